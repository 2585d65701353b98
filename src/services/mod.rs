/// Files received from devices and the local opener
pub mod files;
/// KDE Connect daemon access over D-Bus
pub mod kdeconnect;
