use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares the interest enum together with its feature key and display label.
///
/// The feature key is the only identifier: it names the dataset column, the
/// JSON value and the selection entry. The label is for display only.
macro_rules! interests {
    ($($variant:ident => ($key:literal, $label:literal)),+ $(,)?) => {
        /// One selectable interest or hobby
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Interest {
            $($variant),+
        }

        impl Interest {
            /// Every interest, in catalog order
            pub const ALL: &'static [Interest] = &[$(Interest::$variant),+];

            /// Feature key, matching the dataset column name
            pub fn key(self) -> &'static str {
                match self {
                    $(Interest::$variant => $key),+
                }
            }

            /// Human-facing label
            pub fn label(self) -> &'static str {
                match self {
                    $(Interest::$variant => $label),+
                }
            }
        }

        impl FromStr for Interest {
            type Err = UnknownInterest;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($key => Ok(Interest::$variant),)+
                    other => Err(UnknownInterest(other.to_string())),
                }
            }
        }
    };
}

interests! {
    // Creative arts
    Drawing => ("drawing", "Drawing"),
    Dancing => ("dancing", "Dancing"),
    Singing => ("singing", "Singing"),
    Acting => ("acting", "Acting"),
    Photography => ("photography", "Photography"),
    Designing => ("designing", "Designing"),
    CreativeWriting => ("creative_writing", "Content writing"),
    Crafting => ("crafting", "Crafting"),
    Cartooning => ("cartooning", "Cartooning"),
    Makeup => ("makeup", "Makeup"),
    ListeningMusic => ("listening_music", "Listening Music"),
    // STEM
    Coding => ("coding", "Coding"),
    Mathematics => ("mathematics", "Mathematics"),
    Physics => ("physics", "Physics"),
    Chemistry => ("chemistry", "Chemistry"),
    Biology => ("biology", "Biology"),
    ElectricityComponents => ("electricity_components", "Electricity Components"),
    MechanicParts => ("mechanic_parts", "Mechanic Parts"),
    ComputerParts => ("computer_parts", "Computer Parts"),
    Researching => ("researching", "Researching"),
    Science => ("science", "Science"),
    Engineering => ("engineering", "Engineering"),
    SolvingPuzzles => ("solving_puzzles", "Solving Puzzles"),
    // Medical and life sciences
    Doctor => ("doctor", "Doctor"),
    Botany => ("botany", "Botany"),
    Zoology => ("zoology", "Zoology"),
    Exercise => ("exercise", "Exercise"),
    Pharmacist => ("pharmacist", "Pharmacist"),
    Animals => ("animals", "Animals"),
    Gardening => ("gardening", "Gardening"),
    Yoga => ("yoga", "Yoga"),
    Gymnastics => ("gymnastics", "Gymnastics"),
    // Business and social sciences
    Teaching => ("teaching", "Teaching"),
    Accounting => ("accounting", "Accounting"),
    Economics => ("economics", "Economics"),
    Business => ("business", "Business"),
    BusinessEducation => ("business_education", "Business Education"),
    Journalism => ("journalism", "Journalism"),
    Sociology => ("sociology", "Sociology"),
    Psychology => ("psychology", "Psychology"),
    History => ("history", "History"),
    Geography => ("geography", "Geography"),
    Debating => ("debating", "Debating"),
    // Languages and literature
    Hindi => ("hindi", "Hindi"),
    French => ("french", "French"),
    English => ("english", "English"),
    Urdu => ("urdu", "Urdu"),
    OtherLanguage => ("other_language", "Other Language"),
    Literature => ("literature", "Literature"),
    Reading => ("reading", "Reading"),
    // Other activities
    Sports => ("sports", "Sports"),
    VideoGame => ("video_game", "Video Game"),
    Travelling => ("travelling", "Travelling"),
    Cycling => ("cycling", "Cycling"),
    Knitting => ("knitting", "Knitting"),
    Astrology => ("astrology", "Astrology"),
    HistoricCollection => ("historic_collection", "Historic Collection"),
    Architecture => ("architecture", "Architecture"),
    Director => ("director", "Director"),
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string is not a known feature key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInterest(pub String);

impl fmt::Display for UnknownInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown interest '{}'", self.0)
    }
}

impl std::error::Error for UnknownInterest {}
