use serde::{Deserialize, Serialize};

/// A single rover photo as returned by the Mars Photos API.
///
/// Deserialized straight from the `photos` array of the API response.
/// By the time a `Photo` reaches the selection pipeline it is guaranteed
/// well-formed: non-empty `img_src`, non-empty `camera.name`, and
/// `YYYY-MM-DD` date fields. The photo source adapter rejects the whole
/// response as invalid otherwise — malformed records are never dropped
/// silently.
///
/// # Related Types
///
/// - [`crate::models::BanList`]: filters photos by camera/launch/earth date
/// - [`crate::models::SessionGallery`]: accumulates selected photos
/// - [`crate::services::photo_source::PhotoSourceService`]: produces them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    pub sol: u32,
    pub img_src: String,
    pub earth_date: String,
    pub camera: PhotoCamera,
    pub rover: PhotoRover,
}

/// Camera metadata attached to a photo.
///
/// `name` is the short identifier used for banning (e.g. "MAST"),
/// `full_name` the display string (e.g. "Mast Camera").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoCamera {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
}

/// Rover metadata attached to a photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoRover {
    #[serde(default)]
    pub name: String,
    pub launch_date: String,
}

impl Photo {
    /// One-line description for logs and the console front end.
    pub fn describe(&self) -> String {
        format!(
            "#{} sol {} — {} ({}) on {}",
            self.id, self.sol, self.camera.name, self.earth_date, self.rover.name
        )
    }
}
