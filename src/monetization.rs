//! Ad gating
//!
//! The simulation knows nothing about ads. A rewarded ad only ever shows up
//! as the `granted` flag of [`Command::ContinueWithReward`]; interstitials are
//! paced here between games.

use crate::sim::Command;

/// Anything that can run a rewarded ad and report whether it paid out
pub trait RewardProvider {
    /// Whether a rewarded ad is ready to show
    fn is_ready(&self) -> bool;
    /// Show the ad; true when the player earned the reward
    fn show_rewarded(&mut self) -> bool;
}

/// Provider used when no ad network is wired up: never grants
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAds;

impl RewardProvider for NoAds {
    fn is_ready(&self) -> bool {
        false
    }

    fn show_rewarded(&mut self) -> bool {
        false
    }
}

/// Ask `provider` for a reward and turn the verdict into a continue command
pub fn request_continue(provider: &mut impl RewardProvider) -> Command {
    let granted = provider.is_ready() && provider.show_rewarded();
    log::info!("Rewarded continue {}", if granted { "granted" } else { "denied" });
    Command::ContinueWithReward { granted }
}

/// Games between interstitials
pub const GAMES_PER_INTERSTITIAL: u32 = 3;

/// Counts finished games and says when an interstitial is due
#[derive(Debug, Clone, Copy)]
pub struct InterstitialPacing {
    games_since_last: u32,
    every: u32,
}

impl Default for InterstitialPacing {
    fn default() -> Self {
        Self::new(GAMES_PER_INTERSTITIAL)
    }
}

impl InterstitialPacing {
    pub fn new(every: u32) -> Self {
        Self {
            games_since_last: 0,
            every: every.max(1),
        }
    }

    /// Count a finished game. Returns true when an interstitial should be
    /// shown now, which restarts the count.
    pub fn on_game_over(&mut self, ads_enabled: bool) -> bool {
        self.games_since_last += 1;
        if ads_enabled && self.games_since_last >= self.every {
            self.games_since_last = 0;
            return true;
        }
        false
    }

    pub fn games_since_last(&self) -> u32 {
        self.games_since_last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedAds {
        ready: bool,
        pays: bool,
        shown: u32,
    }

    impl RewardProvider for ScriptedAds {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn show_rewarded(&mut self) -> bool {
            self.shown += 1;
            self.pays
        }
    }

    #[test]
    fn test_no_ads_never_grants() {
        assert_eq!(
            request_continue(&mut NoAds),
            Command::ContinueWithReward { granted: false }
        );
    }

    #[test]
    fn test_unready_ad_is_not_shown() {
        let mut ads = ScriptedAds {
            ready: false,
            pays: true,
            shown: 0,
        };
        assert_eq!(
            request_continue(&mut ads),
            Command::ContinueWithReward { granted: false }
        );
        assert_eq!(ads.shown, 0);
    }

    #[test]
    fn test_granted_reward() {
        let mut ads = ScriptedAds {
            ready: true,
            pays: true,
            shown: 0,
        };
        assert_eq!(
            request_continue(&mut ads),
            Command::ContinueWithReward { granted: true }
        );
        assert_eq!(ads.shown, 1);
    }

    #[test]
    fn test_interstitial_every_third_game() {
        let mut pacing = InterstitialPacing::default();
        let shown: Vec<bool> = (0..7).map(|_| pacing.on_game_over(true)).collect();
        assert_eq!(shown, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_interstitial_waits_while_disabled() {
        let mut pacing = InterstitialPacing::default();
        for _ in 0..5 {
            assert!(!pacing.on_game_over(false));
        }
        assert_eq!(pacing.games_since_last(), 5);
        // Overdue: shows on the first game after ads are re-enabled
        assert!(pacing.on_game_over(true));
        assert_eq!(pacing.games_since_last(), 0);
    }
}
