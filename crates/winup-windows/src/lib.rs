mod dism;
mod office;
mod pswu;
mod scripts;
mod vcredist;

pub use dism::DismInstaller;
pub use office::{locate_client, run_client_update};
pub use pswu::PswuSource;
pub use vcredist::{
    VENDOR_INSTALLERS, install_from_vendor, upgrade_via_winget, winget_available,
};
