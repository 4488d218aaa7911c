// ── Static text tables ──
//
// Per-locale strings keyed by alert kind. Bodies for parameterized kinds
// contain a single `{}` placeholder filled by the catalog.

use crate::model::AlertKind;
use crate::preference::SilencePodPreference;

use super::locale::Locale;

pub(crate) const PLACEHOLDER: &str = "{}";

pub(crate) fn title(locale: Locale, kind: AlertKind) -> &'static str {
    match locale {
        Locale::En => en::title(kind),
        Locale::ZhHans => zh_hans::title(kind),
    }
}

pub(crate) fn body(locale: Locale, kind: AlertKind) -> &'static str {
    match locale {
        Locale::En => en::body(kind),
        Locale::ZhHans => zh_hans::body(kind),
    }
}

/// Background notification body, where it differs from the foreground one.
pub(crate) fn background_body(locale: Locale, kind: AlertKind) -> Option<&'static str> {
    match (locale, kind) {
        (Locale::En, AlertKind::SuspendEnded) => {
            Some("Suspension time is up. Open the app and resume.")
        }
        (Locale::ZhHans, AlertKind::SuspendEnded) => Some("悬架时间增加了。打开应用程序并简历。"),
        _ => None,
    }
}

pub(crate) fn acknowledge_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "OK",
        Locale::ZhHans => "好的",
    }
}

pub(crate) fn silence_title(locale: Locale, pref: SilencePodPreference) -> &'static str {
    match (locale, pref) {
        (Locale::En, SilencePodPreference::Disabled) => "Disabled",
        (Locale::En, SilencePodPreference::Enabled) => "Silenced",
        (Locale::ZhHans, SilencePodPreference::Disabled) => "禁用",
        (Locale::ZhHans, SilencePodPreference::Enabled) => "静音",
    }
}

pub(crate) fn silence_description(locale: Locale, pref: SilencePodPreference) -> &'static str {
    match (locale, pref) {
        (Locale::En, SilencePodPreference::Disabled) => {
            "Normal operation mode where audible Pod beeps are used for all Pod alerts and when confirmation reminders are enabled."
        }
        (Locale::ZhHans, SilencePodPreference::Disabled) => {
            "正常操作模式，其中所有POD警报使用可听见的POD哔哔声以及启用了置信点时。"
        }
        // Only an English description exists for the silenced mode.
        (_, SilencePodPreference::Enabled) => {
            "All Pod alerts use no beeps and confirmation reminder beeps are suppressed. The Pod will only beep for fatal Pod faults and when playing test beeps.\n\n\u{26a0}\u{fe0f}Warning - If your phone is out of range of the pod while this feature is enabled, you will not receive any in-app notifications; and the pod will not beep to alert you."
        }
    }
}

mod en {
    use crate::model::AlertKind;

    pub(super) fn title(kind: AlertKind) -> &'static str {
        match kind {
            AlertKind::MultiCommand => "Multiple Command Alert",
            AlertKind::UserPodExpiration => "Pod Expiration Reminder",
            AlertKind::PodExpiring | AlertKind::PodExpireImminent => "Pod Expired",
            AlertKind::LowReservoir => "Low Reservoir",
            AlertKind::SuspendInProgress => "Suspend In Progress Reminder",
            AlertKind::SuspendEnded => "Resume Insulin",
            AlertKind::FinishSetupReminder => "Pod Pairing Incomplete",
            AlertKind::TimeOffsetChangeDetected => "Time Change Detected",
        }
    }

    pub(super) fn body(kind: AlertKind) -> &'static str {
        match kind {
            AlertKind::MultiCommand => "Multiple Command Alert",
            AlertKind::UserPodExpiration => "Pod expires in {}.",
            AlertKind::PodExpiring => "Change Pod now. Pod has been active for 72 hours.",
            AlertKind::PodExpireImminent => {
                "Change Pod now. Insulin delivery will stop in 1 hour."
            }
            AlertKind::LowReservoir => {
                "{} insulin or less remaining in Pod. Change Pod soon."
            }
            AlertKind::SuspendInProgress => "Suspend In Progress Reminder",
            AlertKind::SuspendEnded => {
                "The insulin suspension period has ended.\n\nYou can resume delivery from the banner on the home screen or from your pump settings screen. You will be reminded again in 15 minutes."
            }
            AlertKind::FinishSetupReminder => "Please finish pairing your pod.",
            AlertKind::TimeOffsetChangeDetected => {
                "The time on your pump is different from the current time. You can review the pump time and sync to current time in settings."
            }
        }
    }
}

mod zh_hans {
    use crate::model::AlertKind;

    pub(super) fn title(kind: AlertKind) -> &'static str {
        match kind {
            AlertKind::MultiCommand => "多重命令警报",
            AlertKind::UserPodExpiration => "POD到期提醒",
            AlertKind::PodExpiring | AlertKind::PodExpireImminent => "豆荚过期",
            AlertKind::LowReservoir => "低水箱",
            AlertKind::SuspendInProgress => "暂停提醒",
            AlertKind::SuspendEnded => "恢复胰岛素",
            AlertKind::FinishSetupReminder => "POD配对不完整",
            AlertKind::TimeOffsetChangeDetected => "时间变化检测到",
        }
    }

    pub(super) fn body(kind: AlertKind) -> &'static str {
        match kind {
            AlertKind::MultiCommand => "多重命令警报",
            AlertKind::UserPodExpiration => "Pod 将在 {} 后过期。",
            AlertKind::PodExpiring => "立即更改POD。 POD活跃了72小时。",
            AlertKind::PodExpireImminent => "立即更改POD。胰岛素输送将在1小时内停止。",
            AlertKind::LowReservoir => "Pod 中剩余 {} 胰岛素或更少。 尽快更换 Pod。",
            AlertKind::SuspendInProgress => "暂停提醒",
            AlertKind::SuspendEnded => {
                "胰岛素暂停期已结束。\n\n您可以从主屏幕上的横幅或泵设置屏幕恢复输送。 15 分钟后将再次提醒您。"
            }
            AlertKind::FinishSetupReminder => "请完成配对您的豆荚。",
            AlertKind::TimeOffsetChangeDetected => {
                "泵上的时间与当前时间不同。您可以在设置中查看泵的时间并同步到当前时间。"
            }
        }
    }
}
