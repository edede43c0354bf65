//! Turns the flat admin submission form into a video or tutorial request.
//!
//! The form carries a variable number of indexed fields (`code_snippet_1`,
//! `code_snippet_2`, ...) so it is extracted as ordered pairs rather than a
//! fixed struct.

use crate::models::tutorial::CreateTutorialRequest;
use crate::models::video::CreateVideoRequest;

const CODE_SNIPPET_PREFIX: &str = "code_snippet_";
const CODE_URL_PREFIX: &str = "code_url_";
const FILES_URL_PREFIX: &str = "files_url_";

/// Submitted form fields in order of first appearance. A repeated name keeps
/// its first value.
#[derive(Clone, Debug, Default)]
pub struct SubmittedForm {
    fields: Vec<(String, String)>,
}

impl SubmittedForm {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: Vec<(String, String)> = Vec::new();
        for (name, value) in pairs {
            if !fields.iter().any(|(existing, _)| *existing == name) {
                fields.push((name, value));
            }
        }
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    fn get_owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Video(CreateVideoRequest),
    Tutorial(CreateTutorialRequest),
}

impl Submission {
    /// A submission without a non-empty `description` is a bare video.
    pub fn from_form(form: &SubmittedForm) -> Self {
        let description = match form.get("description") {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => {
                return Self::Video(CreateVideoRequest {
                    title: form.get_owned("title"),
                    video_embed: form.get_owned("video_embed"),
                })
            }
        };

        let mut code_snippets = Vec::new();
        let mut code_urls = Vec::new();
        let mut files_urls = Vec::new();
        for (name, value) in form.iter() {
            if value.trim().is_empty() {
                continue;
            }
            if name.starts_with(CODE_SNIPPET_PREFIX) {
                code_snippets.push(value.to_string());
            } else if name.starts_with(CODE_URL_PREFIX) {
                code_urls.push(value.to_string());
            } else if name.starts_with(FILES_URL_PREFIX) {
                files_urls.push(value.to_string());
            }
        }

        Self::Tutorial(CreateTutorialRequest {
            title: form.get_owned("title"),
            description,
            code_snippets,
            video_embed: form.get_owned("video_embed"),
            code_urls,
            files_urls,
        })
    }
}
