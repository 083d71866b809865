use serde::{Deserialize, Serialize};

/// Train/validation partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Valid,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Valid];

    /// File stem used for persisted artifacts
    pub fn name(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Records of one stage, held per split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitData<T> {
    pub train: Vec<T>,
    pub valid: Vec<T>,
}

impl<T> SplitData<T> {
    pub fn new(train: Vec<T>, valid: Vec<T>) -> Self {
        Self { train, valid }
    }

    pub fn get(&self, split: Split) -> &[T] {
        match split {
            Split::Train => &self.train,
            Split::Valid => &self.valid,
        }
    }

    /// Apply a fallible per-split transform, train first
    pub fn try_map<U, E, F>(self, mut f: F) -> Result<SplitData<U>, E>
    where
        F: FnMut(Split, Vec<T>) -> Result<Vec<U>, E>,
    {
        let train = f(Split::Train, self.train)?;
        let valid = f(Split::Valid, self.valid)?;
        Ok(SplitData { train, valid })
    }

    pub fn total_len(&self) -> usize {
        self.train.len() + self.valid.len()
    }
}

impl<T> Default for SplitData<T> {
    fn default() -> Self {
        Self {
            train: Vec::new(),
            valid: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_names() {
        assert_eq!(Split::Train.name(), "train");
        assert_eq!(Split::Valid.to_string(), "valid");
    }

    #[test]
    fn test_try_map_stops_on_error() {
        let data = SplitData::new(vec![1, 2], vec![3]);
        let result: Result<SplitData<i32>, String> = data.try_map(|split, v| match split {
            Split::Train => Ok(v),
            Split::Valid => Err("boom".to_string()),
        });

        assert_eq!(result.unwrap_err(), "boom");
    }
}
