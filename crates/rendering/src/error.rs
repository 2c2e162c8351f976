use std::fmt;

/// Why a scene could not be mounted. Mounting checks all of these before it
/// allocates anything, so a failed mount leaves nothing behind.
#[derive(Debug, Clone, PartialEq)]
pub enum MountError {
    /// The host container has no drawable area.
    ZeroSizedHost { width: f32, height: f32 },
    /// Another mount already owns the host container.
    ContainerBusy { owner: u64 },
    /// A scene is already mounted in this app.
    AlreadyMounted,
    /// No building registry resource was installed.
    MissingRegistry,
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::ZeroSizedHost { width, height } => {
                write!(f, "Host container has no drawable area ({width}x{height})")
            }
            MountError::ContainerBusy { owner } => {
                write!(f, "Host container is owned by mount #{owner}")
            }
            MountError::AlreadyMounted => write!(f, "A scene is already mounted"),
            MountError::MissingRegistry => write!(f, "No building registry installed"),
        }
    }
}

impl std::error::Error for MountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_error_display_zero_sized() {
        let err = MountError::ZeroSizedHost {
            width: 0.0,
            height: 600.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("0x600"), "got: {msg}");
    }

    #[test]
    fn test_mount_error_display_busy() {
        let msg = format!("{}", MountError::ContainerBusy { owner: 3 });
        assert!(msg.contains("#3"), "got: {msg}");
    }

    #[test]
    fn test_mount_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(MountError::AlreadyMounted);
        assert!(err.source().is_none());
    }
}
