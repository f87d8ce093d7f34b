use std::path::{Path, PathBuf};

const APP_DIR: &str = "chordpad";

pub fn user_log_dir() -> PathBuf {
	#[cfg(target_os = "windows")]
	{
		std::env::var_os("LOCALAPPDATA")
			.map(PathBuf::from)
			.unwrap_or_else(std::env::temp_dir)
			.join(APP_DIR)
			.join("logs")
	}

	#[cfg(target_os = "macos")]
	{
		home_dir().join("Library").join("Logs").join(APP_DIR)
	}

	#[cfg(all(unix, not(target_os = "macos")))]
	{
		if let Some(state_home) = std::env::var_os("XDG_STATE_HOME").map(PathBuf::from) {
			return state_home.join(APP_DIR).join("logs");
		}
		home_dir().join(".local").join("state").join(APP_DIR).join("logs")
	}
}

pub fn user_config_file() -> PathBuf {
	if let Some(path) = std::env::var_os("CHORDPAD_CONFIG") {
		return PathBuf::from(path);
	}

	#[cfg(target_os = "windows")]
	{
		std::env::var_os("APPDATA")
			.map(PathBuf::from)
			.unwrap_or_else(std::env::temp_dir)
			.join(APP_DIR)
			.join("config.toml")
	}

	#[cfg(target_os = "macos")]
	{
		home_dir().join("Library").join("Application Support").join(APP_DIR).join("config.toml")
	}

	#[cfg(all(unix, not(target_os = "macos")))]
	{
		std::env::var_os("XDG_CONFIG_HOME")
			.map(PathBuf::from)
			.unwrap_or_else(|| home_dir().join(".config"))
			.join(APP_DIR)
			.join("config.toml")
	}
}

fn home_dir() -> PathBuf {
	std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(std::env::temp_dir)
}

pub fn home_substitute(path: &Path) -> String {
	let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
		return path.display().to_string();
	};
	match path.strip_prefix(&home) {
		Ok(rest) if home.as_os_str().len() > 1 => Path::new("~").join(rest).display().to_string(),
		_ => path.display().to_string(),
	}
}

pub fn absolutize(path: &Path) -> PathBuf {
	if path.is_absolute() {
		path.to_path_buf()
	} else {
		std::env::current_dir().map(|cwd| cwd.join(path)).unwrap_or_else(|_| path.to_path_buf())
	}
}

pub fn expand_home(input: &str) -> PathBuf {
	match (input.strip_prefix("~/"), std::env::var_os("HOME")) {
		(Some(rest), Some(home)) => PathBuf::from(home).join(rest),
		_ => PathBuf::from(input),
	}
}
