use crate::models::Photo;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three photo attributes a value can be banned on.
///
/// This is a closed enum: an invalid attribute name is a compile error,
/// not a runtime failure. `FromStr` exists only for the console front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BanAttribute {
    Camera,
    LaunchDate,
    EarthDate,
}

impl BanAttribute {
    /// All attributes, in display order.
    pub const ALL: [BanAttribute; 3] = [
        BanAttribute::Camera,
        BanAttribute::LaunchDate,
        BanAttribute::EarthDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BanAttribute::Camera => "camera",
            BanAttribute::LaunchDate => "launch_date",
            BanAttribute::EarthDate => "earth_date",
        }
    }

    /// The value a photo carries for this attribute.
    pub fn value_of<'a>(&self, photo: &'a Photo) -> &'a str {
        match self {
            BanAttribute::Camera => &photo.camera.name,
            BanAttribute::LaunchDate => &photo.rover.launch_date,
            BanAttribute::EarthDate => &photo.earth_date,
        }
    }
}

impl fmt::Display for BanAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BanAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "camera" => Ok(BanAttribute::Camera),
            "launch_date" | "launch-date" | "launch" => Ok(BanAttribute::LaunchDate),
            "earth_date" | "earth-date" | "earth" => Ok(BanAttribute::EarthDate),
            other => Err(format!("unknown ban attribute: {}", other)),
        }
    }
}

/// User-curated exclusion store: one ordered set of banned values per
/// attribute.
///
/// Membership is what matters; insertion order is kept only so front ends
/// can show the lists in the order the user built them. Created empty at
/// session start, mutated only through explicit add/remove calls, never
/// persisted.
///
/// # Related Types
///
/// - [`crate::services::selection`]: filters candidates with [`BanList::allows`]
/// - [`crate::state::StateManager`]: the only mutation path at runtime
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BanList {
    camera: IndexSet<String>,
    launch_date: IndexSet<String>,
    earth_date: IndexSet<String>,
}

impl BanList {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, attribute: BanAttribute) -> &IndexSet<String> {
        match attribute {
            BanAttribute::Camera => &self.camera,
            BanAttribute::LaunchDate => &self.launch_date,
            BanAttribute::EarthDate => &self.earth_date,
        }
    }

    fn set_mut(&mut self, attribute: BanAttribute) -> &mut IndexSet<String> {
        match attribute {
            BanAttribute::Camera => &mut self.camera,
            BanAttribute::LaunchDate => &mut self.launch_date,
            BanAttribute::EarthDate => &mut self.earth_date,
        }
    }

    /// Ban a value on an attribute. Idempotent.
    ///
    /// Returns true if the value was newly inserted.
    pub fn add(&mut self, attribute: BanAttribute, value: impl Into<String>) -> bool {
        self.set_mut(attribute).insert(value.into())
    }

    /// Lift a ban. Idempotent — removing an absent value is a no-op.
    ///
    /// Returns true if the value was present.
    pub fn remove(&mut self, attribute: BanAttribute, value: &str) -> bool {
        self.set_mut(attribute).shift_remove(value)
    }

    /// Pure membership query, no side effects.
    pub fn is_excluded(&self, attribute: BanAttribute, value: &str) -> bool {
        self.set(attribute).contains(value)
    }

    /// True when none of the photo's three attributes are banned.
    pub fn allows(&self, photo: &Photo) -> bool {
        BanAttribute::ALL
            .iter()
            .all(|attr| !self.is_excluded(*attr, attr.value_of(photo)))
    }

    /// Banned values for one attribute, in insertion order.
    pub fn values(&self, attribute: BanAttribute) -> impl Iterator<Item = &str> {
        self.set(attribute).iter().map(String::as_str)
    }

    pub fn len(&self, attribute: BanAttribute) -> usize {
        self.set(attribute).len()
    }

    /// Total banned values across all attributes.
    pub fn total(&self) -> usize {
        BanAttribute::ALL.iter().map(|a| self.len(*a)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn clear(&mut self) {
        self.camera.clear();
        self.launch_date.clear();
        self.earth_date.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PhotoCamera, PhotoRover};
    use proptest::prelude::*;

    fn photo(camera: &str, launch: &str, earth: &str) -> Photo {
        Photo {
            id: 1,
            sol: 1000,
            img_src: "https://example.com/a.jpg".to_string(),
            earth_date: earth.to_string(),
            camera: PhotoCamera {
                name: camera.to_string(),
                full_name: String::new(),
            },
            rover: PhotoRover {
                name: "Curiosity".to_string(),
                launch_date: launch.to_string(),
            },
        }
    }

    #[test]
    fn test_add_then_is_excluded() {
        let mut bans = BanList::new();
        assert!(bans.add(BanAttribute::Camera, "MAST"));
        assert!(bans.is_excluded(BanAttribute::Camera, "MAST"));
        // Other attributes are untouched
        assert!(!bans.is_excluded(BanAttribute::EarthDate, "MAST"));
    }

    #[test]
    fn test_remove_then_is_excluded() {
        let mut bans = BanList::new();
        bans.add(BanAttribute::EarthDate, "2020-01-01");
        assert!(bans.remove(BanAttribute::EarthDate, "2020-01-01"));
        assert!(!bans.is_excluded(BanAttribute::EarthDate, "2020-01-01"));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut bans = BanList::new();
        assert!(bans.add(BanAttribute::Camera, "MAST"));
        assert!(!bans.add(BanAttribute::Camera, "MAST"));
        assert_eq!(bans.len(BanAttribute::Camera), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut bans = BanList::new();
        assert!(!bans.remove(BanAttribute::LaunchDate, "2011-11-26"));
        assert!(bans.is_empty());
    }

    #[test]
    fn test_allows_requires_all_three_clear() {
        let mut bans = BanList::new();
        let p = photo("NAVCAM", "2011-11-26", "2020-01-01");
        assert!(bans.allows(&p));

        bans.add(BanAttribute::LaunchDate, "2011-11-26");
        assert!(!bans.allows(&p));

        bans.remove(BanAttribute::LaunchDate, "2011-11-26");
        bans.add(BanAttribute::EarthDate, "2020-01-01");
        assert!(!bans.allows(&p));
    }

    #[test]
    fn test_values_keep_insertion_order() {
        let mut bans = BanList::new();
        bans.add(BanAttribute::Camera, "MAST");
        bans.add(BanAttribute::Camera, "FHAZ");
        bans.add(BanAttribute::Camera, "NAVCAM");
        let values: Vec<&str> = bans.values(BanAttribute::Camera).collect();
        assert_eq!(values, vec!["MAST", "FHAZ", "NAVCAM"]);
    }

    #[test]
    fn test_total_and_clear() {
        let mut bans = BanList::new();
        bans.add(BanAttribute::Camera, "MAST");
        bans.add(BanAttribute::EarthDate, "2020-01-01");
        assert_eq!(bans.total(), 2);

        bans.clear();
        assert!(bans.is_empty());
    }

    #[test]
    fn test_attribute_parsing() {
        assert_eq!("camera".parse::<BanAttribute>(), Ok(BanAttribute::Camera));
        assert_eq!(
            "launch_date".parse::<BanAttribute>(),
            Ok(BanAttribute::LaunchDate)
        );
        assert_eq!(
            "EARTH_DATE".parse::<BanAttribute>(),
            Ok(BanAttribute::EarthDate)
        );
        assert!("rover".parse::<BanAttribute>().is_err());
    }

    proptest! {
        #[test]
        fn prop_add_then_excluded_remove_then_not(value in "[A-Z]{2,8}") {
            let mut bans = BanList::new();
            bans.add(BanAttribute::Camera, value.clone());
            prop_assert!(bans.is_excluded(BanAttribute::Camera, &value));
            bans.remove(BanAttribute::Camera, &value);
            prop_assert!(!bans.is_excluded(BanAttribute::Camera, &value));
        }

        #[test]
        fn prop_double_add_keeps_size(value in "[A-Z]{2,8}") {
            let mut bans = BanList::new();
            bans.add(BanAttribute::EarthDate, value.clone());
            let once = bans.len(BanAttribute::EarthDate);
            bans.add(BanAttribute::EarthDate, value);
            prop_assert_eq!(bans.len(BanAttribute::EarthDate), once);
        }
    }
}
