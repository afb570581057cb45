//! Random forest classifier over small integer feature vectors.
//!
//! Each tree is a CART classifier grown on a bootstrap sample with Gini
//! impurity. At every node `sqrt(n_features)` informative features are
//! examined in random order. Class-balanced weights
//! `n_samples / (n_classes * count(class))` multiply the bootstrap
//! multiplicity of each sample. Prediction averages the normalised class
//! distribution of the reached leaf over all trees and takes the argmax,
//! lowest class index on ties.
//!
//! All randomness flows from one seeded [`StdRng`], so fitting the same data
//! with the same parameters always yields the same forest.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::AppError;
use crate::models::ForestParams;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    /// Samples with `x[feature] <= threshold` go left
    Split {
        feature: usize,
        threshold: u8,
        left: usize,
        right: usize,
    },
}

/// A single fitted classification tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    depth: usize,
}

/// Borrowed training data shared by every tree
struct TrainingSet<'a> {
    x: &'a [Vec<u8>],
    y: &'a [usize],
    n_classes: usize,
}

struct TreeBuilder<'a> {
    data: &'a TrainingSet<'a>,
    weights: Vec<f64>,
    max_depth: usize,
    min_samples_split: usize,
    max_features: usize,
    rng: StdRng,
    nodes: Vec<Node>,
    depth: usize,
}

struct SplitCandidate {
    feature: usize,
    threshold: u8,
    impurity: f64,
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        self.depth = self.depth.max(depth);
        let counts = self.class_weights(&samples);
        let total: f64 = counts.iter().sum();
        let impurity = gini(&counts, total);

        let is_pure = impurity <= f64::EPSILON;
        if depth >= self.max_depth || samples.len() < self.min_samples_split || is_pure {
            return self.push_leaf(counts, total);
        }

        let Some(split) = self.best_split(&samples, &counts, total) else {
            return self.push_leaf(counts, total);
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| self.data.x[i][split.feature] <= split.threshold);

        // Reserve the slot so the parent precedes its children
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf { distribution: Vec::new() });
        let left = self.build(left_samples, depth + 1);
        let right = self.build(right_samples, depth + 1);
        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        tracing::trace!(
            "node {} splits on feature {} at {} (child impurity {:.4})",
            index,
            split.feature,
            split.threshold,
            split.impurity
        );
        index
    }

    fn class_weights(&self, samples: &[usize]) -> Vec<f64> {
        let mut counts = vec![0.0; self.data.n_classes];
        for &i in samples {
            counts[self.data.y[i]] += self.weights[i];
        }
        counts
    }

    fn push_leaf(&mut self, counts: Vec<f64>, total: f64) -> usize {
        let distribution = if total > 0.0 {
            counts.into_iter().map(|c| c / total).collect()
        } else {
            counts
        };
        self.nodes.push(Node::Leaf { distribution });
        self.nodes.len() - 1
    }

    fn best_split(&mut self, samples: &[usize], parent: &[f64], total: f64) -> Option<SplitCandidate> {
        let n_features = self.data.x[samples[0]].len();
        let mut order: Vec<usize> = (0..n_features).collect();
        order.shuffle(&mut self.rng);

        let mut best: Option<SplitCandidate> = None;
        let mut visited = 0;

        for feature in order {
            if visited >= self.max_features {
                break;
            }

            // Per-value weighted class counts, ordered by value
            let mut buckets: Vec<(u8, Vec<f64>)> = Vec::new();
            for &i in samples {
                let value = self.data.x[i][feature];
                let pos = match buckets.binary_search_by_key(&value, |(v, _)| *v) {
                    Ok(pos) => pos,
                    Err(pos) => {
                        buckets.insert(pos, (value, vec![0.0; self.data.n_classes]));
                        pos
                    }
                };
                buckets[pos].1[self.data.y[i]] += self.weights[i];
            }

            if buckets.len() < 2 {
                continue;
            }
            visited += 1;

            let mut left = vec![0.0; self.data.n_classes];
            for (value, counts) in &buckets[..buckets.len() - 1] {
                for (acc, c) in left.iter_mut().zip(counts) {
                    *acc += c;
                }
                let left_total: f64 = left.iter().sum();
                let right: Vec<f64> = parent
                    .iter()
                    .zip(&left)
                    .map(|(all, l)| all - l)
                    .collect();
                let right_total = total - left_total;
                let impurity = (left_total * gini(&left, left_total)
                    + right_total * gini(&right, right_total))
                    / total;

                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: *value,
                        impurity,
                    });
                }
            }
        }

        best
    }
}

fn gini(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>()
}

impl DecisionTree {
    fn fit(data: &TrainingSet<'_>, weights: Vec<f64>, params: &ForestParams, max_features: usize, seed: u64) -> Self {
        let samples: Vec<usize> = (0..data.y.len()).filter(|&i| weights[i] > 0.0).collect();
        let mut builder = TreeBuilder {
            data,
            weights,
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split.max(2),
            max_features,
            rng: StdRng::seed_from_u64(seed),
            nodes: Vec::new(),
            depth: 0,
        };
        builder.build(samples, 0);
        Self {
            nodes: builder.nodes,
            depth: builder.depth,
        }
    }

    /// Class distribution of the leaf reached by `x`
    pub fn leaf_distribution(&self, x: &[u8]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution } => return distribution,
                Node::Split { feature, threshold, left, right } => {
                    let value = x.get(*feature).copied().unwrap_or(0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Bagged ensemble of decision trees
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    n_features: usize,
}

impl RandomForest {
    /// Fit a forest on rows `x` with class indices `y` in `0..n_classes`
    pub fn fit(x: &[Vec<u8>], y: &[usize], n_classes: usize, params: &ForestParams) -> Result<Self, AppError> {
        if x.is_empty() || x.len() != y.len() {
            return Err(AppError::DataUnavailable(format!(
                "cannot fit on {} rows with {} labels",
                x.len(),
                y.len()
            )));
        }
        let n_features = x[0].len();
        if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
            return Err(AppError::DataUnavailable("feature rows have inconsistent width".to_string()));
        }
        if y.iter().any(|&c| c >= n_classes) {
            return Err(AppError::DataUnavailable("label index out of range".to_string()));
        }
        if params.n_trees == 0 {
            return Err(AppError::DataUnavailable("forest needs at least one tree".to_string()));
        }

        let n = y.len();
        let class_weight = class_weights(y, n_classes, params.balanced);
        let max_features = ((n_features as f64).sqrt() as usize).max(1);
        let data = TrainingSet { x, y, n_classes };

        let mut rng = StdRng::seed_from_u64(params.seed);
        let trees = (0..params.n_trees)
            .map(|_| {
                let tree_seed: u64 = rng.gen();
                let mut multiplicity = vec![0u32; n];
                for _ in 0..n {
                    multiplicity[rng.gen_range(0..n)] += 1;
                }
                let weights = multiplicity
                    .iter()
                    .zip(y)
                    .map(|(&m, &c)| m as f64 * class_weight[c])
                    .collect();
                DecisionTree::fit(&data, weights, params, max_features, tree_seed)
            })
            .collect();

        Ok(Self {
            trees,
            n_classes,
            n_features,
        })
    }

    /// Mean class distribution across trees
    pub fn predict_proba(&self, x: &[u8]) -> Vec<f64> {
        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(x)) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        proba
    }

    /// Most probable class index
    pub fn predict(&self, x: &[u8]) -> usize {
        let proba = self.predict_proba(x);
        let mut best = 0;
        for (class, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = class;
            }
        }
        best
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Row length the forest was fitted on
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

/// Per-class sample weights; all ones unless `balanced`
fn class_weights(y: &[usize], n_classes: usize, balanced: bool) -> Vec<f64> {
    if !balanced {
        return vec![1.0; n_classes];
    }
    let mut counts = vec![0usize; n_classes];
    for &c in y {
        counts[c] += 1;
    }
    let present = counts.iter().filter(|&&c| c > 0).count() as f64;
    counts
        .iter()
        .map(|&c| if c > 0 { y.len() as f64 / (present * c as f64) } else { 0.0 })
        .collect()
}
