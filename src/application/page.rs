// Page abstraction - the named form fields the geocode controller touches

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    City,
    State,
    /// Single combined "city, state" input used by some forms instead of city/state.
    Location,
    Latitude,
    Longitude,
    LoadingSpinner,
    SubmitButton,
    LoadingMessage,
}

impl FieldId {
    pub fn dom_id(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::State => "state",
            Self::Location => "location",
            Self::Latitude => "id_latitude",
            Self::Longitude => "id_longitude",
            Self::LoadingSpinner => "loadingSpinner",
            Self::SubmitButton => "submitBtn",
            Self::LoadingMessage => "loadingMessage",
        }
    }
}

/// The page hosting the form. Implementations own their interior state,
/// the way a document does, so every method takes `&self`.
pub trait PageView: Send + Sync {
    fn has_field(&self, field: FieldId) -> bool;

    /// Current value of an input, `None` if the field is not on the page.
    fn field_value(&self, field: FieldId) -> Option<String>;

    fn set_field_value(&self, field: FieldId, value: &str);

    fn set_visible(&self, field: FieldId, visible: bool);

    fn add_class(&self, field: FieldId, class: &str);

    /// Blocking user-facing notice.
    fn alert(&self, message: &str);

    /// Current query string, without the leading `?`.
    fn location_query(&self) -> String;

    /// Replace the current history entry's query string without reloading.
    fn replace_location_query(&self, query: &str);
}
