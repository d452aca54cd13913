/// Tag used for operations that declare none.
pub const DEFAULT_TAG: &str = "default";

/// Suffix appended to a parent name when resolving array items.
pub const ITEM_SUFFIX: &str = "Item";

/// The only media type whose named schemas are bound to operations.
pub const JSON_MEDIA_TYPE: &str = "application/json";

pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
