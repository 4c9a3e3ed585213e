pub mod preferences;
pub mod viewer;

pub use preferences::Preferences;
pub use viewer::Viewer;

/// The page shown next to the navbar. The viewer itself lives on the app so
/// favorites survive navigation.
pub enum Screen {
    Viewer,
    Preferences(Preferences),
}
