mod clip;
mod response;

pub use clip::*;
pub use response::*;

pub const DEFAULT_LANGUAGE: &str = "en";

macro_rules! common_derives {
    ($item:item) => {
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        $item
    };
}

pub(crate) use common_derives;
