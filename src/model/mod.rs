pub mod surface;
pub mod vertex;
pub mod zone;

pub use surface::{Surface, SurfaceType};
pub use vertex::VertexKey;
pub use zone::ZoneContext;
