//! Form State Store: raw field text and the ocean-proximity selection.

use shared::{
    domain::{FormField, NumericField, OceanProximity, NUMERIC_FIELD_COUNT},
    error::FieldError,
};
use tokio::sync::watch;

/// Known-good record used by "Load Sample Data", ordered like [`NumericField::ALL`].
pub const SAMPLE_VALUES: [&str; NUMERIC_FIELD_COUNT] = [
    "-122.23", "37.88", "41", "880", "129", "322", "126", "8.3252",
];
pub const SAMPLE_OCEAN_PROXIMITY: OceanProximity = OceanProximity::NearBay;

/// Raw, uncoerced form contents. Every numeric field always has an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    numeric: [String; NUMERIC_FIELD_COUNT],
    ocean_proximity: OceanProximity,
}

impl FormState {
    pub fn sample() -> Self {
        Self {
            numeric: SAMPLE_VALUES.map(str::to_string),
            ocean_proximity: SAMPLE_OCEAN_PROXIMITY,
        }
    }

    pub fn value(&self, field: NumericField) -> &str {
        &self.numeric[field.index()]
    }

    pub fn ocean_proximity(&self) -> OceanProximity {
        self.ocean_proximity
    }

    pub fn set_numeric(&mut self, field: NumericField, value: impl Into<String>) {
        self.numeric[field.index()] = value.into();
    }

    pub fn set_ocean_proximity(&mut self, value: OceanProximity) {
        self.ocean_proximity = value;
    }

    pub fn numeric_values(&self) -> impl Iterator<Item = (NumericField, &str)> + '_ {
        NumericField::ALL
            .into_iter()
            .map(move |field| (field, self.value(field)))
    }

    /// Numeric fields left blank; all of them are required before submitting.
    pub fn missing_fields(&self) -> Vec<NumericField> {
        self.numeric_values()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.numeric_values()
            .all(|(_, value)| !value.trim().is_empty())
    }
}

/// Owns the live [`FormState`] and notifies subscribers on every change.
pub struct FormStore {
    state: watch::Sender<FormState>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        Self::with_state(FormState::default())
    }

    pub fn with_state(initial: FormState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub fn set_numeric(&self, field: NumericField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|state| state.set_numeric(field, value));
    }

    pub fn set_ocean_proximity(&self, value: OceanProximity) {
        self.state
            .send_modify(|state| state.set_ocean_proximity(value));
    }

    /// Overwrites exactly one field. Numeric fields take any text; the
    /// categorical field only accepts one of its enum labels, and on error the
    /// stored state is unchanged and subscribers are not notified.
    pub fn set_field(&self, field: FormField, value: &str) -> Result<(), FieldError> {
        match field {
            FormField::Numeric(field) => {
                self.set_numeric(field, value);
                Ok(())
            }
            FormField::OceanProximity => {
                self.set_ocean_proximity(value.parse()?);
                Ok(())
            }
        }
    }

    pub fn set_field_by_name(&self, name: &str, value: &str) -> Result<(), FieldError> {
        self.set_field(name.parse()?, value)
    }

    /// Replaces every field with the sample record in a single update.
    pub fn load_sample(&self) {
        self.state.send_replace(FormState::sample());
    }

    pub fn get_state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_empty_numeric_fields_and_inland() {
        let store = FormStore::new();
        let state = store.get_state();
        for field in NumericField::ALL {
            assert_eq!(state.value(field), "");
        }
        assert_eq!(state.ocean_proximity(), OceanProximity::Inland);
        assert_eq!(state.missing_fields(), NumericField::ALL.to_vec());
        assert!(!state.is_complete());
    }

    #[test]
    fn last_write_wins_per_field_without_touching_others() {
        let store = FormStore::new();
        let writes = [
            (NumericField::Latitude, "37"),
            (NumericField::TotalRooms, "880"),
            (NumericField::Latitude, "37.8"),
            (NumericField::Households, ""),
            (NumericField::Latitude, "37.88"),
            (NumericField::Households, "126"),
        ];
        for (field, value) in writes {
            store.set_numeric(field, value);
        }

        let state = store.get_state();
        assert_eq!(state.value(NumericField::Latitude), "37.88");
        assert_eq!(state.value(NumericField::TotalRooms), "880");
        assert_eq!(state.value(NumericField::Households), "126");
        assert_eq!(state.value(NumericField::Longitude), "");
        assert_eq!(state.ocean_proximity(), OceanProximity::Inland);
    }

    #[test]
    fn stores_any_text_without_validation() {
        let store = FormStore::new();
        store
            .set_field_by_name("longitude", "not a number")
            .expect("numeric fields accept any text");
        assert_eq!(store.get_state().value(NumericField::Longitude), "not a number");
    }

    #[test]
    fn load_sample_replaces_every_field() {
        let store = FormStore::new();
        store.set_numeric(NumericField::Population, "999999");
        store.set_ocean_proximity(OceanProximity::Island);

        store.load_sample();
        let state = store.get_state();

        let values: Vec<&str> = state.numeric_values().map(|(_, value)| value).collect();
        assert_eq!(values, SAMPLE_VALUES.to_vec());
        assert_eq!(state.ocean_proximity(), OceanProximity::NearBay);
        assert_eq!(state, FormState::sample());
        assert!(state.is_complete());
    }

    #[test]
    fn load_sample_is_idempotent() {
        let store = FormStore::new();
        store.load_sample();
        let first = store.get_state();
        store.load_sample();
        assert_eq!(store.get_state(), first);
    }

    #[test]
    fn load_sample_publishes_a_single_update() {
        let store = FormStore::new();
        let mut rx = store.subscribe();

        store.load_sample();

        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), FormState::sample());
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[test]
    fn set_field_notifies_subscribers() {
        let store = FormStore::new();
        let mut rx = store.subscribe();

        store
            .set_field(FormField::OceanProximity, "NEAR OCEAN")
            .expect("valid option");

        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(rx.borrow_and_update().ocean_proximity(), OceanProximity::NearOcean);
    }

    #[test]
    fn invalid_category_leaves_state_untouched() {
        let store = FormStore::new();
        let rx = store.subscribe();

        let err = store
            .set_field_by_name("ocean_proximity", "DESERT")
            .expect_err("outside the enum");
        assert_eq!(err, FieldError::InvalidOceanProximity("DESERT".into()));
        assert_eq!(store.get_state().ocean_proximity(), OceanProximity::Inland);
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[test]
    fn unknown_field_name_is_reported() {
        let store = FormStore::new();
        assert_eq!(
            store.set_field_by_name("bedrooms", "3"),
            Err(FieldError::UnknownField("bedrooms".into()))
        );
        assert_eq!(store.get_state(), FormState::default());
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut state = FormState::sample();
        state.set_numeric(NumericField::MedianIncome, "   ");
        assert_eq!(state.missing_fields(), vec![NumericField::MedianIncome]);
        assert!(!state.is_complete());
    }
}
