use std::io;
use std::process::Command;

/// Opens an http(s) link with the platform's default handler.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    if !is_web_link(url) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Only http(s) links can be opened",
        ));
    }

    if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", "", url]).spawn()?;
    } else if cfg!(target_os = "linux") {
        Command::new("xdg-open").arg(url).spawn()?;
    } else if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()?;
    } else {
        return Err(io::Error::new(io::ErrorKind::Other, "Unsupported OS"));
    }

    Ok(())
}

fn is_web_link(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_web_links_are_accepted() {
        assert!(is_web_link("https://apod.nasa.gov/apod/image/2401/a.jpg"));
        assert!(is_web_link("http://example.com"));
        assert!(!is_web_link("file:///etc/passwd"));
        assert!(!is_web_link("javascript:alert(1)"));
        assert!(!is_web_link(""));
    }

    #[test]
    fn refuses_to_open_local_paths() {
        let err = open_in_browser("/tmp/picture.jpg").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
