mod validated_json;
mod validated_path;
mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_path::ValidatedPath;
pub use validated_query::ValidatedQuery;
