use bikeshare_core::models::{City, Schema, TripFilter, TripRecord};

/// An ordered set of trips from one city, plus that city's column schema.
///
/// Records are never mutated after load; filtering only drops rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCollection {
    city: City,
    schema: Schema,
    records: Vec<TripRecord>,
}

impl TripCollection {
    pub fn new(city: City, schema: Schema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of this collection holding only the trips `filter` matches.
    pub fn filter(&self, filter: &TripFilter) -> TripCollection {
        Self {
            city: self.city,
            schema: self.schema,
            records: self
                .records
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect(),
        }
    }

    /// Consuming form of [`TripCollection::filter`].
    pub fn into_filtered(mut self, filter: &TripFilter) -> TripCollection {
        self.records.retain(|r| filter.matches(r));
        self
    }
}
