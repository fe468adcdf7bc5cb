use crate::core::domain::{City, TripRecord};

/// All trips loaded for one city, in file order.
///
/// The store is read-only once built. Filtering borrows it and produces
/// index-based views, so any number of views can coexist over one store.
#[derive(Debug, Clone)]
pub struct RecordStore {
    city: City,
    records: Vec<TripRecord>,
    has_gender: bool,
    has_birth_year: bool,
}

impl RecordStore {
    /// Build a store from already-parsed trips.
    ///
    /// `has_gender` / `has_birth_year` say whether the source carried those
    /// columns at all, which is distinct from every value being blank.
    pub fn from_records(
        city: City,
        records: Vec<TripRecord>,
        has_gender: bool,
        has_birth_year: bool,
    ) -> Self {
        Self {
            city,
            records,
            has_gender,
            has_birth_year,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_gender(&self) -> bool {
        self.has_gender
    }

    pub fn has_birth_year(&self) -> bool {
        self.has_birth_year
    }

    /// Iterate trips in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TripRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
