//! Collection-level serialization.

use super::error::SerializeResult;
use super::walker;
use super::{CollectionSerializable, Record, SerializedMap};

/// Serializes every record in iteration order with the same path specs.
///
/// Output is fully materialized; the first failure aborts the whole call.
pub fn serialize_all<'r, R, I>(records: I, path_specs: &[&str]) -> SerializeResult<Vec<SerializedMap>>
where
    R: Record + ?Sized + 'r,
    I: IntoIterator<Item = &'r R>,
{
    records
        .into_iter()
        .map(|record| walker::serialize(record, path_specs))
        .collect()
}

/// Ordered, owned result set of records.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet<R> {
    records: Vec<R>,
}

impl<R> Default for RecordSet<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> RecordSet<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<R> {
        self.records
    }
}

impl<R> FromIterator<R> for RecordSet<R> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R> IntoIterator for RecordSet<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'s, R> IntoIterator for &'s RecordSet<R> {
    type Item = &'s R;
    type IntoIter = std::slice::Iter<'s, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<R: Record> CollectionSerializable for RecordSet<R> {
    fn serialize_all(&self, path_specs: &[&str]) -> SerializeResult<Vec<SerializedMap>> {
        serialize_all(&self.records, path_specs)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordSet;

    #[test]
    fn record_set_keeps_insertion_order() {
        let set: RecordSet<u8> = [3, 1, 2].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0), Some(&3));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert!(RecordSet::<u8>::default().is_empty());
    }
}
