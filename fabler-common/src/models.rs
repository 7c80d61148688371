/// A persisted story record.
///
/// `original_title` and `suggested_title` only appear after a retitle pass,
/// and are left out of the JSON until then.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Story {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub genre: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_title: Option<String>,
    pub chapters: Vec<Chapter>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Chapter {
    pub title: String,
    pub content: String,
}

/// Output of the analyze command, written next to the source record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AnalyzedStory {
    pub title: String,
    pub description: String,
    pub chapters: Vec<AnalyzedChapter>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AnalyzedChapter {
    pub original_title: String,
    pub suggested_title: String,
    pub content: String,
}
