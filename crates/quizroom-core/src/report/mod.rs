//! Scoring results and rendered artifacts.
//!
//! The controller stores a [`ResultPayload`] without looking inside it.
//! Presentation code converts it to a [`ProfileView`].

mod assets;
mod payload;
mod view;

pub use assets::{decode_data_uri, filename_from_content_disposition, ChartImages, Report};
pub use payload::{
    ContentStrategy, CreatorProfile, DataAnalysis, DomainProfile, DomainScore, DomainScores,
    MbtiProfile, ResultPayload, ResultSchema,
};
pub use view::{ProfileView, Section};
