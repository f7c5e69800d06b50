pub mod price_scale;
pub mod primitives;
pub mod projection;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use price_scale::PriceScale;
pub use projection::{project_point, project_points};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{LogicalPoint, PixelPoint, TimeValue, ViewPoint, Viewport};
