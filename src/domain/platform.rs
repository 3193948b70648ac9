use std::fmt;

/// Host operating system family, as far as installation and remediation care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsCategory {
    Linux,
    MacOs,
    /// Windows shells (Git Bash, MSYS2, Cygwin) or native Windows
    Windows,
    Unsupported(String),
}

impl OsCategory {
    /// Maps a kernel name as reported by `uname -s` to a category.
    pub fn from_kernel_name(name: &str) -> Self {
        let name = name.trim();
        let upper = name.to_ascii_uppercase();

        if upper == "LINUX" {
            Self::Linux
        } else if upper == "DARWIN" {
            Self::MacOs
        } else if ["MINGW", "MSYS", "CYGWIN", "WINDOWS_NT"]
            .iter()
            .any(|prefix| upper.starts_with(prefix))
        {
            Self::Windows
        } else {
            Self::Unsupported(name.to_string())
        }
    }

    /// Maps the compile-time target OS (`std::env::consts::OS`).
    pub fn from_target_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// How to bring the Docker daemon up on this platform.
    pub fn daemon_remedy(&self) -> &'static str {
        match self {
            Self::Linux => {
                "Start it with 'sudo systemctl start docker' and make sure your user is in the 'docker' group."
            }
            Self::MacOs => "Open Docker Desktop (open -a Docker) and wait for it to finish starting.",
            Self::Windows => "Start Docker Desktop and wait until it reports that the engine is running.",
            Self::Unsupported(_) => "Start the Docker daemon for your platform.",
        }
    }
}

impl fmt::Display for OsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "Linux"),
            Self::MacOs => write!(f, "macOS"),
            Self::Windows => write!(f, "Windows"),
            Self::Unsupported(name) => write!(f, "unsupported ({name})"),
        }
    }
}
