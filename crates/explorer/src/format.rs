//! File-format classification for display purposes.

/// Icon classifier for a display node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Folder,
    Document,
    Texture,
    Model,
    Animation,
    Skeleton,
    Material,
    Audio,
    Param,
    Effect,
    Text,
    Video,
}

/// Icon category for a file extension (without the leading dot).
pub fn category_for_extension(extension: &str) -> FileCategory {
    match extension {
        "nutexb" | "bntx" => FileCategory::Texture,
        "numdlb" | "numshb" | "numshexb" | "nusrcmdlb" => FileCategory::Model,
        "nuanmb" | "nuhlpb" => FileCategory::Animation,
        "nusktb" => FileCategory::Skeleton,
        "numatb" | "nushdb" => FileCategory::Material,
        "nus3audio" | "nus3bank" | "lopus" | "csb" => FileCategory::Audio,
        "prc" | "stprm" | "stdat" => FileCategory::Param,
        "eff" => FileCategory::Effect,
        "msbt" | "sqb" => FileCategory::Text,
        "webm" => FileCategory::Video,
        _ => FileCategory::Document,
    }
}

/// Human description for a file extension.
pub fn description_for_extension(extension: &str) -> &'static str {
    match category_for_extension(extension) {
        FileCategory::Folder => "Folder",
        FileCategory::Document => "Document",
        FileCategory::Texture => "Texture",
        FileCategory::Model => "Model",
        FileCategory::Animation => "Animation",
        FileCategory::Skeleton => "Skeleton",
        FileCategory::Material => "Material",
        FileCategory::Audio => "Audio",
        FileCategory::Param => "Parameters",
        FileCategory::Effect => "Effects",
        FileCategory::Text => "Message text",
        FileCategory::Video => "Video",
    }
}
