//! MIME type lookup module
//!
//! Maps file extensions to Content-Type values. Lookup is case-insensitive
//! and falls back to `application/octet-stream` for anything unmapped.

/// Get the Content-Type for a file extension.
///
/// # Examples
/// ```
/// use embedhttp::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html");
/// assert_eq!(get_content_type(Some("PNG")), "image/png");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return "application/octet-stream";
    };

    match ext.to_ascii_lowercase().as_str() {
        // Text
        "htm" | "html" | "shtml" => "text/html",
        "css" => "text/css",
        "txt" => "text/plain",
        "xml" | "rss" => "text/xml",
        "mml" => "text/mathml",
        "htc" => "text/x-component",

        // JavaScript
        "js" => "application/x-javascript",

        // Images
        "gif" => "image/gif",
        "jpeg" | "jpg" => "image/jpeg",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "jng" => "image/x-jng",
        "wbmp" => "image/vnd.wap.wbmp",

        // Video
        "asf" | "asx" => "video/x-ms-asf",
        "avi" => "video/x-msvideo",
        "flv" => "video/x-flv",
        "mng" => "video/x-mng",
        "mov" => "video/quicktime",
        "mp4" => "video/mp4",
        "mpeg" | "mpg" => "video/mpeg",
        "wmv" => "video/x-ms-wmv",

        // Audio
        "mp3" => "audio/mpeg",
        "ra" => "audio/x-realaudio",

        // Java
        "jar" | "war" | "ear" => "application/java-archive",
        "jardiff" => "application/x-java-archive-diff",
        "jnlp" => "application/x-java-jnlp-file",

        // Documents
        "pdf" => "application/pdf",

        // Certificates
        "crt" | "der" | "pem" => "application/x-x509-ca-cert",

        // Archives
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        "rpm" => "application/x-redhat-package-manager",
        "hqx" => "application/mac-binhex40",
        "sea" => "application/x-sea",
        "sit" => "application/x-stuffit",

        // Scripts
        "pl" | "pm" => "application/x-perl",
        "tcl" | "tk" => "application/x-tcl",
        "run" => "application/x-makeself",

        // Palm
        "pdb" | "prc" => "application/x-pilot",

        // Misc
        "swf" => "application/x-shockwave-flash",
        "cco" => "application/x-cocoa",
        "xpi" => "application/x-xpinstall",

        // Explicitly binary, same as the fallback
        "bin" | "deb" | "dll" | "dmg" | "eot" | "exe" | "img" | "iso" | "msi" | "msm" | "msp" => {
            "application/octet-stream"
        }

        // Default
        _ => "application/octet-stream",
    }
}
