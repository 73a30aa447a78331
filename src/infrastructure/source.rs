use crate::domain::{Course, LoadError, LoadResult};
use crossbeam_channel::{Receiver, bounded};
use std::fs;
use std::path::PathBuf;
use std::thread;
use tracing::{debug, error};

/// Something that can produce the full course list.
pub trait CourseSource: Send {
    fn load_all(&self) -> LoadResult<Vec<Course>>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

pub struct FileCourseSource {
    path: PathBuf,
}

impl FileCourseSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CourseSource for FileCourseSource {
    fn load_all(&self) -> LoadResult<Vec<Course>> {
        let content = fs::read_to_string(&self.path)?;
        let courses = serde_json::from_str::<Vec<Course>>(&content)?;
        Ok(courses)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpCourseSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpCourseSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl CourseSource for HttpCourseSource {
    fn load_all(&self) -> LoadResult<Vec<Course>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        let courses = serde_json::from_str::<Vec<Course>>(&body)?;
        Ok(courses)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks a source for `location`: `http://` and `https://` locations are
/// fetched over HTTP, anything else is read as a local file.
pub fn source_for(location: &str) -> Box<dyn CourseSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpCourseSource::new(location))
    } else {
        Box::new(FileCourseSource::new(location))
    }
}

/// Runs a single load on a background thread. The returned receiver yields
/// exactly one result; the load is neither cancelled nor retried.
pub fn spawn_loader(source: Box<dyn CourseSource>) -> Receiver<LoadResult<Vec<Course>>> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let location = source.describe();
        debug!(%location, "loading courses");
        let result = source.load_all();
        if let Err(ref e) = result {
            error!(%location, error = %e, "course load failed");
        }
        // The UI may already be gone; nobody is left to notify then.
        let _ = tx.send(result);
    });
    rx
}
