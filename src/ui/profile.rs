//! XP / Level Widget
//!
//! Projects the server's profile into the nav bar: level label, XP label and
//! the fill bar for progress through the current level band.

use std::rc::Rc;

use crate::api::{ApiResult, PlannerApi, Profile};
use crate::dom::ElementRef;

#[derive(Clone)]
pub struct ProfileWidget {
    api: Rc<dyn PlannerApi>,
    level: Option<ElementRef>,
    xp: Option<ElementRef>,
    fill: Option<ElementRef>,
    xp_per_level: u32,
}

impl ProfileWidget {
    pub fn new(
        api: Rc<dyn PlannerApi>,
        level: Option<ElementRef>,
        xp: Option<ElementRef>,
        fill: Option<ElementRef>,
        xp_per_level: u32,
    ) -> Self {
        Self {
            api,
            level,
            xp,
            fill,
            xp_per_level,
        }
    }

    /// Width of the fill bar for `profile`, e.g. `30%`
    pub fn fill_width(&self, profile: &Profile) -> String {
        format!("{}%", profile.band_progress(self.xp_per_level))
    }

    /// Write `profile` into whichever elements are present
    pub fn render(&self, profile: &Profile) {
        if let Some(level) = &self.level {
            level.set_text(&format!("Lvl {}", profile.level));
        }
        if let Some(xp) = &self.xp {
            xp.set_text(&profile.xp.to_string());
        }
        if let Some(fill) = &self.fill {
            fill.set_style("width", &self.fill_width(profile));
        }
    }

    /// Fetch the profile and render it.
    ///
    /// A non-2xx answer leaves the widget untouched; transport and decode
    /// failures are logged and also leave it untouched.
    pub async fn refresh(&self) -> ApiResult<Profile> {
        match self.api.fetch_profile().await {
            Ok(profile) => {
                self.render(&profile);
                tracing::debug!("Profile updated: level {} xp {}", profile.level, profile.xp);
                Ok(profile)
            }
            Err(e) if e.is_status() => {
                tracing::debug!("Profile not updated: {}", e);
                Err(e)
            }
            Err(e) => {
                tracing::error!("Failed to update profile: {}", e);
                Err(e)
            }
        }
    }
}
