//! Localized user-facing strings.
//!
//! Unknown locales fall back to English; unknown keys come back verbatim.

pub const DEFAULT_LOCALE: &str = "en";

fn lookup(locale: &str, key: &str) -> Option<&'static str> {
    let zh = locale.starts_with("zh");
    let text = match (key, zh) {
        ("messages.success.save", false) => "Saved successfully",
        ("messages.success.save", true) => "保存成功",
        ("messages.share.toggleOpen", false) => "Your resume is now public",
        ("messages.share.toggleOpen", true) => "简历已公开分享",
        ("messages.share.toggleClose", false) => "Your resume is now private",
        ("messages.share.toggleClose", true) => "简历已取消分享",
        ("messages.resume.template", false) => "Resume template updated",
        ("messages.resume.template", true) => "简历模板已更新",
        ("messages.resume.linkGithub", false) => "GitHub profile linked to your resume",
        ("messages.resume.linkGithub", true) => "已在简历中关联 GitHub",
        ("messages.resume.unlinkGithub", false) => "GitHub profile unlinked from your resume",
        ("messages.resume.unlinkGithub", true) => "已取消简历与 GitHub 的关联",
        ("messages.resume.notPublished", false) => "This resume has not been published yet",
        ("messages.resume.notPublished", true) => "该简历尚未发布",
        ("messages.resume.notFound", false) => "Resume not found",
        ("messages.resume.notFound", true) => "未找到该简历",
        ("resumePage.title", false) => "{}'s resume",
        ("resumePage.title", true) => "{}的简历",
        ("mobile.menu.github", false) => "GitHub",
        ("mobile.menu.github", true) => "GitHub 总结",
        ("mobile.menu.resume", false) => "Resume",
        ("mobile.menu.resume", true) => "简历",
        _ => return None,
    };
    Some(text)
}

/// Translates `key` for `locale`.
pub fn t(locale: &str, key: &str) -> String {
    lookup(locale, key)
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

/// Translates `key` and substitutes `arg` for its `{}` placeholder.
pub fn t_with(locale: &str, key: &str, arg: &str) -> String {
    t(locale, key).replacen("{}", arg, 1)
}
