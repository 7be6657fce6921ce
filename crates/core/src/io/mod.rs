//! I/O for the external vector interchange format

mod geojson;

pub use geojson::{
    read_geojson, read_geojson_from_buffer, write_geojson, write_geojson_to_buffer,
};
