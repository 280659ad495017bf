//! Magic-byte content detection.

/// Content kind of a byte blob, determined from magic bytes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// gzip stream (`1f 8b`).
    Gzip,
    /// bzip2 stream (`BZh` plus a block-size digit).
    Bzip2,
    /// tar archive (`ustar` magic at offset 257).
    Tar,
    /// ELF executable.
    Executable,
    /// zip archive; recognized but not installable.
    Zip,
    /// xz stream; recognized but not installable.
    Xz,
    /// zstd stream; recognized but not installable.
    Zstd,
    /// No magic matched. Treated as a binary blob and installable as-is.
    Unknown,
}

impl ContentKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContentKind::Gzip => "gzip",
            ContentKind::Bzip2 => "bzip2",
            ContentKind::Tar => "tar",
            ContentKind::Executable => "executable",
            ContentKind::Zip => "zip",
            ContentKind::Xz => "xz",
            ContentKind::Zstd => "zstd",
            ContentKind::Unknown => "unknown",
        }
    }

    /// Whether a blob of this kind can be written to disk as a binary.
    ///
    /// An unrecognized blob and an ELF executable are the same outcome:
    /// installable as-is.
    pub fn is_installable(&self) -> bool {
        matches!(self, ContentKind::Executable | ContentKind::Unknown)
    }
}

/// Identify a blob by its magic bytes.
pub fn sniff(bytes: &[u8]) -> ContentKind {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        return ContentKind::Gzip;
    }
    if bytes.len() >= 4 && bytes.starts_with(b"BZh") && bytes[3].is_ascii_digit() {
        return ContentKind::Bzip2;
    }
    if bytes.starts_with(&[0x7f, b'E', b'L', b'F']) {
        return ContentKind::Executable;
    }
    if bytes.starts_with(&[0xfd, b'7', b'z', b'X', b'Z', 0x00]) {
        return ContentKind::Xz;
    }
    if bytes.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
        return ContentKind::Zstd;
    }
    if bytes.starts_with(b"PK\x03\x04") || bytes.starts_with(b"PK\x05\x06") {
        return ContentKind::Zip;
    }
    if is_tar(bytes) {
        return ContentKind::Tar;
    }
    ContentKind::Unknown
}

/// POSIX ustar magic, shared by the GNU variant, at header offset 257.
fn is_tar(bytes: &[u8]) -> bool {
    bytes.len() > 262 && &bytes[257..262] == b"ustar"
}
