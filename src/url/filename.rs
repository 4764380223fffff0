use crate::UrlError;

/// Derives a file name from a URL path
///
/// The file name is the substring after the last `/`. A path with no `/`
/// or with an empty final segment (the root path `/`, or any path ending
/// in a slash) carries no file name; that is a per-URL failure the caller
/// must contain without aborting the crawl.
///
/// # Arguments
///
/// * `path` - The URL path component
///
/// # Returns
///
/// * `Ok(&str)` - The non-empty final path segment
/// * `Err(UrlError::NoFileInPath)` - The path yields no file name
pub fn file_name_from_path(path: &str) -> Result<&str, UrlError> {
    let name = match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => return Err(UrlError::NoFileInPath(path.to_string())),
    };

    if name.is_empty() {
        return Err(UrlError::NoFileInPath(path.to_string()));
    }

    Ok(name)
}

/// Returns the extension of a file name: the substring after the last `.`,
/// or the empty string if the name has no dot.
pub fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) => &file_name[index + 1..],
        None => "",
    }
}

/// Returns true if the extension marks HTML content.
///
/// The comparison is case-sensitive: exactly `htm` or `html`. Uppercase
/// variants are treated as non-HTML and terminate traversal at that file.
pub fn is_html_extension(extension: &str) -> bool {
    extension == "htm" || extension == "html"
}
