use minijinja::{context, Environment};

use crate::models::tutorial::Tutorial;
use crate::models::video::Video;

/// Page templates compiled into the binary. `.html` templates auto-escape.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../../templates/layout.html"))?;
        env.add_template("index.html", include_str!("../../templates/index.html"))?;
        env.add_template("tutorials.html", include_str!("../../templates/tutorials.html"))?;
        Ok(Self { env })
    }

    pub fn render_index(&self, videos: &[Video], is_admin: bool) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {
            latest_videos => videos,
            is_admin => is_admin,
        })
    }

    pub fn render_tutorials(
        &self,
        tutorials: &[Tutorial],
        is_admin: bool,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("tutorials.html")?.render(context! {
            tutorials => tutorials,
            is_admin => is_admin,
        })
    }
}
