pub mod impl_fake;
#[cfg(target_os = "linux")]
pub mod impl_v4l;
pub mod interface;
