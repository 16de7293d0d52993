pub mod io;
pub mod plane;
pub mod raster;
pub mod traits;

pub use self::plane::ChannelPlane;
pub use self::raster::{GrayImageU8, RasterView, RgbaRaster};
pub use self::traits::{ImageView, Rows};
