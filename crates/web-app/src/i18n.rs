use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Serialize, Deserialize, Display, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    /// Label of the language selection, naming the language switched to.
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self.toggled() {
            Language::En => "EN",
            Language::Zh => "中文",
        }
    }
}

#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Loading,
    NoExercise,
    Set,
    AddedWeight,
    Kilogram,
    Time,
    Second,
    Rest,
    Dismiss,
    NewExercise,
    ToggleSounds,
    NextSound,
    InstallApp,
    EnterFullscreen,
    ExitFullscreen,
    NewVersion,
    PageNotFound,
}

impl Text {
    #[must_use]
    pub fn translate(self, language: Language) -> &'static str {
        match language {
            Language::En => self.en(),
            Language::Zh => self.zh(),
        }
    }

    fn en(self) -> &'static str {
        match self {
            Text::Loading => "Loading...",
            Text::NoExercise => "No exercise found. Please add an exercise to the database.",
            Text::Set => "Set",
            Text::AddedWeight => "Added Weight",
            Text::Kilogram => "KG",
            Text::Time => "Time",
            Text::Second => "s",
            Text::Rest => "Rest",
            Text::Dismiss => "Dismiss",
            Text::NewExercise => "New exercise",
            Text::ToggleSounds => "Toggle sounds",
            Text::NextSound => "Next sound",
            Text::InstallApp => "Install App",
            Text::EnterFullscreen => "Enter Fullscreen",
            Text::ExitFullscreen => "Exit Fullscreen",
            Text::NewVersion => "New version available! Refresh to update?",
            Text::PageNotFound => "Page not found",
        }
    }

    fn zh(self) -> &'static str {
        match self {
            Text::Loading => "加载中...",
            Text::NoExercise => "未找到练习。请先添加练习。",
            Text::Set => "组",
            Text::AddedWeight => "附加重量",
            Text::Kilogram => "公斤",
            Text::Time => "时间",
            Text::Second => "秒",
            Text::Rest => "休息",
            Text::Dismiss => "关闭",
            Text::NewExercise => "换一个练习",
            Text::ToggleSounds => "切换音效",
            Text::NextSound => "下一个音效",
            Text::InstallApp => "安装应用",
            Text::EnterFullscreen => "进入全屏",
            Text::ExitFullscreen => "退出全屏",
            Text::NewVersion => "有新版本！是否刷新以更新？",
            Text::PageNotFound => "页面未找到",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_language_toggled() {
        assert_eq!(Language::En.toggled(), Language::Zh);
        assert_eq!(Language::Zh.toggled(), Language::En);
    }

    #[rstest]
    #[case(Language::En, "中文")]
    #[case(Language::Zh, "EN")]
    fn test_language_toggle_label(#[case] language: Language, #[case] expected: &str) {
        assert_eq!(language.toggle_label(), expected);
    }

    #[rstest]
    #[case("en", Language::En)]
    #[case("zh", Language::Zh)]
    fn test_language_from_str(#[case] value: &str, #[case] expected: Language) {
        assert_eq!(value.parse::<Language>().unwrap(), expected);
        assert_eq!(expected.to_string(), value);
    }

    #[rstest]
    fn test_text_translated(#[values(Language::En, Language::Zh)] language: Language) {
        let texts = Text::iter()
            .map(|text| text.translate(language))
            .collect::<Vec<_>>();

        assert!(texts.iter().all(|text| !text.is_empty()));
        assert_eq!(texts.iter().collect::<HashSet<_>>().len(), texts.len());
    }

    #[test]
    fn test_text_differs_between_languages() {
        assert!(
            Text::iter()
                .all(|text| text.translate(Language::En) != text.translate(Language::Zh))
        );
    }
}
