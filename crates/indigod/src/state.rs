//! Process-lifetime platform state carried between requests.
//!
//! Debug levels persist until a request carries a new value. The station PHY
//! mode and channel width are staged by one request and consumed by the next
//! station configuration render.

use strum::{Display, EnumString, IntoStaticStr};

/// Verbosity requested for one of the managed wireless daemons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugLevel {
    /// No debug flags.
    #[default]
    Disabled,
    /// A single `-d`.
    Basic,
    /// Triple `-ddd`.
    Advanced,
}

impl DebugLevel {
    /// Parses a controller supplied level.
    ///
    /// The value is read like C `atoi`: leading whitespace and an optional sign
    /// are accepted and parsing stops at the first non-digit, so garbage maps to
    /// zero. Zero disables debugging, one selects basic output and anything else
    /// selects advanced output.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match leading_integer(text) {
            0 => Self::Disabled,
            1 => Self::Basic,
            _ => Self::Advanced,
        }
    }

    /// Launch flags for the access-point daemon.
    #[must_use]
    pub const fn hostapd_args(self) -> &'static str {
        match self {
            Self::Disabled => "",
            Self::Basic => "-dK",
            Self::Advanced => "-dddK",
        }
    }

    /// Launch flags for the station daemon.
    #[must_use]
    pub const fn wpas_args(self) -> &'static str {
        match self {
            Self::Disabled => "",
            Self::Basic => "-d",
            Self::Advanced => "-ddd",
        }
    }
}

fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });
    if negative { -magnitude } else { magnitude }
}

/// Physical-layer generation requested for the station radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum PhyMode {
    /// Driver defaults.
    #[strum(serialize = "auto")]
    Auto,
    /// 802.11b only.
    #[strum(serialize = "11b")]
    B,
    /// 802.11b/g.
    #[strum(serialize = "11bg")]
    Bg,
    /// 802.11b/g/n.
    #[strum(serialize = "11bgn")]
    Bgn,
    /// 802.11a.
    #[strum(serialize = "11a")]
    A,
    /// 802.11n in the 5 GHz band.
    #[strum(serialize = "11na")]
    Na,
    /// 802.11ac.
    #[strum(serialize = "11ac")]
    Ac,
    /// 802.11ax in the 2.4 GHz band.
    #[strum(serialize = "11axg")]
    AxG,
    /// 802.11ax in the 5 GHz band.
    #[strum(serialize = "11axa")]
    AxA,
}

/// Channel width requested for the station radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum ChannelWidth {
    /// Driver defaults.
    #[strum(serialize = "auto")]
    Auto,
    /// 20 MHz.
    #[strum(serialize = "20")]
    Mhz20,
    /// 40 MHz.
    #[strum(serialize = "40")]
    Mhz40,
    /// 80 MHz.
    #[strum(serialize = "80")]
    Mhz80,
    /// 160 MHz.
    #[strum(serialize = "160")]
    Mhz160,
    /// Two non-contiguous 80 MHz segments.
    #[strum(serialize = "80plus80")]
    Mhz80Plus80,
}

/// A value staged by one request for a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingSetting<T> {
    /// Nothing has been requested yet.
    #[default]
    Unset,
    /// Waiting for the next consumer.
    Pending(T),
    /// Already consumed; the value is kept as the last one applied.
    Consumed(T),
}

impl<T: Copy> PendingSetting<T> {
    /// Stages `value` for the next consumer.
    pub fn set(&mut self, value: T) {
        *self = Self::Pending(value);
    }

    /// Takes the staged value, leaving it marked as consumed.
    pub fn take(&mut self) -> Option<T> {
        match *self {
            Self::Pending(value) => {
                *self = Self::Consumed(value);
                Some(value)
            }
            Self::Unset | Self::Consumed(_) => None,
        }
    }

    /// Drops any staged value without consuming it.
    pub fn clear(&mut self) {
        if let Self::Pending(value) = *self {
            *self = Self::Consumed(value);
        }
    }

    /// Returns the staged value without consuming it.
    #[must_use]
    pub const fn pending(&self) -> Option<T> {
        match *self {
            Self::Pending(value) => Some(value),
            Self::Unset | Self::Consumed(_) => None,
        }
    }

    /// Returns the most recent value, staged or consumed.
    #[must_use]
    pub const fn last(&self) -> Option<T> {
        match *self {
            Self::Pending(value) | Self::Consumed(value) => Some(value),
            Self::Unset => None,
        }
    }
}

/// Mutable state shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformState {
    hostapd_debug: DebugLevel,
    wpas_debug: DebugLevel,
    phy_mode: PendingSetting<PhyMode>,
    channel_width: PendingSetting<ChannelWidth>,
}

impl Default for PlatformState {
    fn default() -> Self {
        Self {
            hostapd_debug: DebugLevel::Disabled,
            wpas_debug: DebugLevel::Basic,
            phy_mode: PendingSetting::Unset,
            channel_width: PendingSetting::Unset,
        }
    }
}

impl PlatformState {
    /// Replaces the access-point daemon debug level.
    pub const fn set_hostapd_debug_level(&mut self, level: DebugLevel) {
        self.hostapd_debug = level;
    }

    /// Replaces the station daemon debug level.
    pub const fn set_wpas_debug_level(&mut self, level: DebugLevel) {
        self.wpas_debug = level;
    }

    /// Current access-point daemon debug level.
    #[must_use]
    pub const fn hostapd_debug_level(&self) -> DebugLevel {
        self.hostapd_debug
    }

    /// Current station daemon debug level.
    #[must_use]
    pub const fn wpas_debug_level(&self) -> DebugLevel {
        self.wpas_debug
    }

    /// Launch flags for the access-point daemon.
    #[must_use]
    pub const fn hostapd_debug_args(&self) -> &'static str {
        self.hostapd_debug.hostapd_args()
    }

    /// Launch flags for the station daemon.
    #[must_use]
    pub const fn wpas_debug_args(&self) -> &'static str {
        self.wpas_debug.wpas_args()
    }

    /// Stages a PHY mode for the next station render.
    pub fn set_pending_phy_mode(&mut self, mode: PhyMode) {
        self.phy_mode.set(mode);
    }

    /// Drops any staged PHY mode.
    pub fn clear_pending_phy_mode(&mut self) {
        self.phy_mode.clear();
    }

    /// Stages a channel width for the next station render.
    pub fn set_pending_channel_width(&mut self, width: ChannelWidth) {
        self.channel_width.set(width);
    }

    /// PHY mode staging slot.
    #[must_use]
    pub const fn phy_mode(&self) -> PendingSetting<PhyMode> {
        self.phy_mode
    }

    /// Channel width staging slot.
    #[must_use]
    pub const fn channel_width(&self) -> PendingSetting<ChannelWidth> {
        self.channel_width
    }

    /// Last channel width requested, staged or already consumed.
    #[must_use]
    pub const fn last_channel_width(&self) -> Option<ChannelWidth> {
        self.channel_width.last()
    }

    pub(crate) fn take_phy_mode(&mut self) -> Option<PhyMode> {
        self.phy_mode.take()
    }

    pub(crate) fn take_channel_width(&mut self) -> Option<ChannelWidth> {
        self.channel_width.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", DebugLevel::Disabled)]
    #[case("1", DebugLevel::Basic)]
    #[case("2", DebugLevel::Advanced)]
    #[case("  1", DebugLevel::Basic)]
    #[case("1abc", DebugLevel::Basic)]
    #[case("abc", DebugLevel::Disabled)]
    #[case("", DebugLevel::Disabled)]
    #[case("-1", DebugLevel::Advanced)]
    fn debug_level_follows_leading_integer(#[case] text: &str, #[case] expected: DebugLevel) {
        assert_eq!(DebugLevel::from_text(text), expected);
    }

    #[rstest]
    #[case(DebugLevel::Disabled, "", "")]
    #[case(DebugLevel::Basic, "-dK", "-d")]
    #[case(DebugLevel::Advanced, "-dddK", "-ddd")]
    fn debug_arguments_per_daemon(
        #[case] level: DebugLevel,
        #[case] hostapd: &str,
        #[case] wpas: &str,
    ) {
        assert_eq!(level.hostapd_args(), hostapd);
        assert_eq!(level.wpas_args(), wpas);
    }

    #[test]
    fn defaults_match_daemon_conventions() {
        let state = PlatformState::default();
        assert_eq!(state.hostapd_debug_args(), "");
        assert_eq!(state.wpas_debug_args(), "-d");
        assert_eq!(state.phy_mode(), PendingSetting::Unset);
    }

    #[rstest]
    #[case("11bgn", PhyMode::Bgn)]
    #[case("11axa", PhyMode::AxA)]
    #[case("auto", PhyMode::Auto)]
    fn phy_modes_parse(#[case] text: &str, #[case] expected: PhyMode) {
        assert_eq!(text.parse::<PhyMode>().expect("known mode"), expected);
    }

    #[rstest]
    #[case("80plus80", ChannelWidth::Mhz80Plus80)]
    #[case("20", ChannelWidth::Mhz20)]
    fn widths_parse(#[case] text: &str, #[case] expected: ChannelWidth) {
        assert_eq!(text.parse::<ChannelWidth>().expect("known width"), expected);
    }

    #[rstest]
    #[case("11n")]
    #[case("AUTO")]
    #[case("")]
    fn unknown_phy_modes_are_rejected(#[case] text: &str) {
        assert!(text.parse::<PhyMode>().is_err());
    }

    #[test]
    fn pending_setting_is_consumed_once() {
        let mut slot = PendingSetting::default();
        assert_eq!(slot.take(), None);
        slot.set(ChannelWidth::Mhz40);
        assert_eq!(slot.pending(), Some(ChannelWidth::Mhz40));
        assert_eq!(slot.take(), Some(ChannelWidth::Mhz40));
        assert_eq!(slot.take(), None);
        assert_eq!(slot.last(), Some(ChannelWidth::Mhz40));
    }

    #[test]
    fn clearing_keeps_last_value() {
        let mut slot = PendingSetting::default();
        slot.set(PhyMode::Na);
        slot.clear();
        assert_eq!(slot, PendingSetting::Consumed(PhyMode::Na));
        assert_eq!(slot.pending(), None);
    }
}
