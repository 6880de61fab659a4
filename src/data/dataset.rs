use burn::data::dataset::Dataset;

/// One scaled feature row with its one-hot target.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularSample {
    pub features: Vec<f32>,
    pub target:   Vec<f32>,
}

pub struct TabularDataset {
    samples: Vec<TabularSample>,
}

impl TabularDataset {
    pub fn new(samples: Vec<TabularSample>) -> Self { Self { samples } }
}

impl Dataset<TabularSample> for TabularDataset {
    fn get(&self, index: usize) -> Option<TabularSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_indexing() {
        let ds = TabularDataset::new(vec![
            TabularSample { features: vec![0.1], target: vec![1.0, 0.0] },
            TabularSample { features: vec![0.2], target: vec![0.0, 1.0] },
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).map(|s| s.target), Some(vec![0.0, 1.0]));
        assert!(ds.get(2).is_none());
    }
}
