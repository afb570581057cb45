use crate::models::{CategoryView, Interest, InterestOption, SelectionSet};
use Interest::*;

/// A display category and its interests, in presentation order
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub interests: &'static [Interest],
}

static CATALOG: [Category; 6] = [
    Category {
        name: "Creative Arts",
        interests: &[
            Drawing, Dancing, Singing, Acting, Photography, Designing,
            CreativeWriting, Crafting, Cartooning, Makeup, ListeningMusic,
        ],
    },
    Category {
        name: "STEM & Technology",
        interests: &[
            Coding, Mathematics, Physics, Chemistry, Biology, ElectricityComponents,
            MechanicParts, ComputerParts, Researching, Science, Engineering, SolvingPuzzles,
        ],
    },
    Category {
        name: "Medical & Life Sciences",
        interests: &[
            Doctor, Botany, Zoology, Exercise, Pharmacist, Animals, Gardening, Yoga, Gymnastics,
        ],
    },
    Category {
        name: "Business & Social Sciences",
        interests: &[
            Teaching, Accounting, Economics, Business, BusinessEducation, Journalism,
            Sociology, Psychology, History, Geography, Debating,
        ],
    },
    Category {
        name: "Languages & Literature",
        interests: &[Hindi, French, English, Urdu, OtherLanguage, Literature, Reading],
    },
    Category {
        name: "Other Activities",
        interests: &[
            Sports, VideoGame, Travelling, Cycling, Knitting, Astrology,
            HistoricCollection, Architecture, Director,
        ],
    },
];

/// The static interest catalog
pub fn catalog() -> &'static [Category] {
    &CATALOG
}

/// Render the catalog with checkbox state taken from `selection`
pub fn catalog_view(selection: &SelectionSet) -> Vec<CategoryView> {
    CATALOG
        .iter()
        .map(|category| CategoryView {
            name: category.name.to_string(),
            interests: category
                .interests
                .iter()
                .map(|&interest| InterestOption {
                    interest,
                    label: interest.label().to_string(),
                    selected: selection.contains(&interest),
                })
                .collect(),
        })
        .collect()
}
