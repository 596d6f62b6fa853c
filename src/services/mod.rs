pub mod droid;
pub mod field_extractor;
pub mod navigator;
pub mod portal_session;
pub mod price_scraper;
pub mod work_scraper;

pub use droid::*;
pub use field_extractor::*;
pub use navigator::*;
pub use price_scraper::*;
pub use work_scraper::*;
