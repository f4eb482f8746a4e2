//! Terminal rendering of the view model and notices.

use colored::Colorize;

use crate::application::controller::{Notice, NoticeLevel, StatusTone, ViewModel};

pub fn render_view(view: &ViewModel) -> String {
    let mut out = Vec::new();

    let user = if view.signed_in {
        view.user_label.bright_white().bold()
    } else {
        view.user_label.bright_black()
    };
    out.push(format!("  User:     {user}"));

    let folder = if view.folder_enabled {
        view.folder_label.cyan()
    } else {
        view.folder_label.bright_black()
    };
    out.push(format!("  Folder:   {folder}"));

    if let Some(status) = &view.status {
        let text = match status.tone {
            StatusTone::Checking => status.text.yellow(),
            StatusTone::Available => status.text.green(),
            StatusTone::Taken => status.text.red(),
        };
        out.push(format!("  Status:   {text}"));
    }

    let register = if view.registering {
        "Registering...".yellow()
    } else if view.register_enabled {
        "ready (:register)".green()
    } else {
        "unavailable".bright_black()
    };
    out.push(format!("  Register: {register}"));

    if let Some(url) = &view.success_url {
        out.push(format!("  Live at:  {}", url.bright_cyan().underline()));
    }

    out.join("\n")
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✅ {}", notice.message.green()),
        NoticeLevel::Error => format!("❌ {}", notice.message.red()),
    }
}

pub fn help() -> String {
    [
        "Type a subdomain name to check it. Commands:".bright_white().to_string(),
        format!("  {}     sign in with a token", ":login".cyan()),
        format!("  {}    sign out", ":logout".cyan()),
        format!("  {}    choose the parent folder", ":folder".cyan()),
        format!("  {}  register the current name", ":register".cyan()),
        format!("  {}    show the current state", ":status".cyan()),
        format!("  {}      exit", ":quit".cyan()),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::controller::StatusLine;

    fn view() -> ViewModel {
        ViewModel {
            user_label: "alice".to_string(),
            signed_in: true,
            input_enabled: true,
            folder_enabled: true,
            register_enabled: true,
            registering: false,
            folder_label: "📁 /home/alice/sites".to_string(),
            status: Some(StatusLine {
                tone: StatusTone::Available,
                text: "myblog.puter.site is available!".to_string(),
            }),
            success_url: None,
        }
    }

    #[test]
    fn test_render_view_contains_labels() {
        let out = render_view(&view());

        assert!(out.contains("alice"));
        assert!(out.contains("/home/alice/sites"));
        assert!(out.contains("myblog.puter.site is available!"));
        assert!(out.contains("ready"));
        assert!(!out.contains("Live at"));
    }

    #[test]
    fn test_render_view_shows_success_url() {
        let mut v = view();
        v.register_enabled = false;
        v.success_url = Some("https://myblog.puter.site".to_string());

        let out = render_view(&v);

        assert!(out.contains("https://myblog.puter.site"));
        assert!(out.contains("unavailable"));
    }

    #[test]
    fn test_render_notice() {
        let out = render_notice(&Notice::error("Failed to save folder choice"));
        assert!(out.contains("Failed to save folder choice"));
    }
}
