use serde::{Deserialize, Serialize};

use super::question::Rating;
use crate::error::ValidationError;

/// Fixed-length, indexed answer storage.
///
/// Slot `i` always belongs to question `i`. There is no append: answering
/// a question again overwrites its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerVector {
    slots: Vec<Option<Rating>>,
}

impl AnswerVector {
    /// All-unanswered vector with one slot per question.
    pub fn zeroed(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rating> {
        self.slots.get(index).copied().flatten()
    }

    pub fn set(&mut self, index: usize, rating: Rating) -> Result<(), ValidationError> {
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or(ValidationError::OutOfBounds {
            collection: "answers".into(),
            index,
            len,
        })?;
        *slot = Some(rating);
        Ok(())
    }

    /// Invalidate one slot. Out-of-range indices are ignored.
    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Reset every slot to unanswered, keeping the length.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Indices that still have no answer.
    pub fn missing(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect()
    }

    /// Wire form: one integer per question, `0` for unanswered.
    pub fn to_wire(&self) -> Vec<u8> {
        self.slots
            .iter()
            .map(|s| s.map(Rating::value).unwrap_or(0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(v: i64) -> Rating {
        Rating::new(v).unwrap()
    }

    #[test]
    fn zeroed_has_requested_length() {
        let answers = AnswerVector::zeroed(20);
        assert_eq!(answers.len(), 20);
        assert_eq!(answers.to_wire(), vec![0; 20]);
        assert_eq!(answers.answered_count(), 0);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut answers = AnswerVector::zeroed(3);
        answers.set(0, r(5)).unwrap();
        answers.set(0, r(3)).unwrap();
        assert_eq!(answers.get(0), Some(r(3)));
        assert_eq!(answers.len(), 3);
    }

    #[test]
    fn set_out_of_bounds_fails_without_growing() {
        let mut answers = AnswerVector::zeroed(2);
        let err = answers.set(2, r(1)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfBounds {
                collection: "answers".into(),
                index: 2,
                len: 2
            }
        );
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn missing_lists_unanswered_slots() {
        let mut answers = AnswerVector::zeroed(4);
        answers.set(1, r(2)).unwrap();
        answers.set(3, r(4)).unwrap();
        assert_eq!(answers.missing(), vec![0, 2]);
        answers.clear(3);
        assert_eq!(answers.missing(), vec![0, 2, 3]);
        assert_eq!(answers.answered_count(), 1);
    }

    #[test]
    fn reset_keeps_length() {
        let mut answers = AnswerVector::zeroed(2);
        answers.set(0, r(1)).unwrap();
        answers.set(1, r(1)).unwrap();
        assert!(answers.missing().is_empty());
        answers.reset();
        assert_eq!(answers.to_wire(), vec![0, 0]);
    }
}
