use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::Situation;

/// This struct provide a convenient way to use Situation as the index of the
/// array. Situations that were never written stay absent, so "unvisited" is
/// not confused with a stored default.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SituationArray<T: Default> {
    data: HashMap<Situation, T>,
}

impl<T: Default> SituationArray<T> {
    pub fn new() -> SituationArray<T> {
        SituationArray {
            data: HashMap::new(),
        }
    }

    pub fn get(&self, index: &Situation) -> Option<&T> {
        self.data.get(index)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Situation, &T)> {
        self.data.iter()
    }
}

impl<T: Default> IntoIterator for SituationArray<T> {
    type Item = (Situation, T);
    type IntoIter = std::collections::hash_map::IntoIter<Situation, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<T: Default> Index<&Situation> for SituationArray<T> {
    type Output = T;
    fn index(&self, index: &Situation) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: Default> IndexMut<&Situation> for SituationArray<T> {
    fn index_mut(&mut self, index: &Situation) -> &mut Self::Output {
        self.data.entry(*index).or_default()
    }
}
