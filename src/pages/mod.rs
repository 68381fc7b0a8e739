pub mod landing;
pub mod profile;
pub mod quiz;
pub mod results;
