//! UI Components
//!
//! Leptos components for the SimpleBot pages.

pub mod command_bar;
pub mod connection_bar;
pub mod drive_pad;
pub mod header;
pub mod live_camera;
pub mod loading;
pub mod object_panels;
pub mod robot_log;
pub mod toast;

pub use command_bar::CommandBar;
pub use connection_bar::ConnectionBar;
pub use drive_pad::DrivePad;
pub use header::Header;
pub use live_camera::LiveCamera;
pub use loading::InlineLoading;
pub use object_panels::ObjectPanels;
pub use robot_log::RobotLog;
pub use toast::Toast;
