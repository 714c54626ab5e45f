use super::CarouselError;
use std::collections::HashSet;
use std::ops::Index;

/// The words cycled through by a carousel.
///
/// Guaranteed non-empty and free of duplicates; immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WordList(Vec<String>);

impl WordList {
    pub(crate) fn new<I, S>(words: I) -> Result<Self, CarouselError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(CarouselError::EmptyWordList);
        }
        let mut seen = HashSet::new();
        for word in &words {
            if !seen.insert(word.as_str()) {
                return Err(CarouselError::DuplicateWord(word.clone()));
            }
        }
        Ok(Self(words))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Index<usize> for WordList {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}
