use tracing::debug;

use crate::models::Episode;

/// Tracks the current episode of a series and resolves its neighbours.
///
/// The episode list is taken as given; its order is the playback order.
/// An externally supplied current episode, when present, takes precedence
/// over the locally selected one.
#[derive(Debug, Clone, Default)]
pub struct EpisodeNavigator {
    episodes: Vec<Episode>,
    selected: Option<Episode>,
    external: Option<Episode>,
}

impl EpisodeNavigator {
    pub fn new(episodes: Vec<Episode>, current: Option<Episode>) -> Self {
        Self {
            episodes,
            selected: None,
            external: current,
        }
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.external.as_ref().or(self.selected.as_ref())
    }

    fn position_of(&self, episode: &Episode) -> Option<usize> {
        self.episodes
            .iter()
            .position(|candidate| candidate.same_slot(episode))
    }

    /// The episode after `current` in list order, matched by (season, episode)
    pub fn find_next_episode(&self, current: &Episode) -> Option<&Episode> {
        self.position_of(current)
            .and_then(|index| self.episodes.get(index + 1))
    }

    pub fn find_previous_episode(&self, current: &Episode) -> Option<&Episode> {
        self.position_of(current)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.episodes.get(index))
    }

    pub fn next_episode(&self) -> Option<&Episode> {
        self.current_episode()
            .and_then(|current| self.find_next_episode(current))
    }

    pub fn previous_episode(&self) -> Option<&Episode> {
        self.current_episode()
            .and_then(|current| self.find_previous_episode(current))
    }

    pub fn is_last_episode(&self) -> bool {
        match (self.current_episode(), self.episodes.last()) {
            (Some(current), Some(last)) => current.same_slot(last),
            _ => false,
        }
    }

    /// Make `episode` current. The caller reports the change outward.
    pub fn select(&mut self, episode: Episode) -> &Episode {
        debug!("Selected episode {} ({})", episode.id, episode.tag());
        self.external = None;
        self.selected.insert(episode)
    }

    /// Move to the next episode. Returns `None`, changing nothing, when the
    /// current episode is the last one or unknown.
    pub fn advance(&mut self) -> Option<&Episode> {
        let next = self.next_episode()?.clone();
        Some(self.select(next))
    }

    pub fn go_back(&mut self) -> Option<&Episode> {
        let previous = self.previous_episode()?.clone();
        Some(self.select(previous))
    }

    /// Replace the externally supplied current episode
    pub fn set_override(&mut self, episode: Option<Episode>) {
        self.external = episode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EpisodeId;

    fn episode(id: u64, season: u32, number: u32) -> Episode {
        Episode {
            id: EpisodeId::new(id),
            title: format!("S{} E{}", season, number),
            synopsis: String::new(),
            duration: 42,
            season_number: season,
            episode_number: number,
            release_date: None,
            thumbnail: String::new(),
            video_url: format!("https://cdn.test/ep{}.mp4", id),
        }
    }

    fn two_seasons() -> Vec<Episode> {
        vec![episode(1, 1, 1), episode(2, 1, 2), episode(3, 2, 1)]
    }

    #[test]
    fn test_next_crosses_season_boundary() {
        let navigator = EpisodeNavigator::new(two_seasons(), None);
        let next = navigator.find_next_episode(&episode(2, 1, 2)).unwrap();
        assert_eq!(next.order_key(), (2, 1));
        assert!(navigator.find_next_episode(&episode(3, 2, 1)).is_none());
    }

    #[test]
    fn test_lookup_matches_slot_not_id() {
        let navigator = EpisodeNavigator::new(two_seasons(), None);
        let next = navigator.find_next_episode(&episode(99, 1, 1)).unwrap();
        assert_eq!(next.id, EpisodeId::new(2));
        assert!(navigator.find_next_episode(&episode(5, 3, 1)).is_none());
    }

    #[test]
    fn test_list_order_is_not_resorted() {
        let episodes = vec![episode(3, 2, 1), episode(1, 1, 1)];
        let navigator = EpisodeNavigator::new(episodes, None);
        let next = navigator.find_next_episode(&episode(3, 2, 1)).unwrap();
        assert_eq!(next.id, EpisodeId::new(1));
    }

    #[test]
    fn test_no_current_means_no_next() {
        let navigator = EpisodeNavigator::new(two_seasons(), None);
        assert!(navigator.current_episode().is_none());
        assert!(navigator.next_episode().is_none());
        assert!(!navigator.is_last_episode());
    }

    #[test]
    fn test_advance_walks_to_the_end() {
        let mut navigator = EpisodeNavigator::new(two_seasons(), Some(episode(1, 1, 1)));

        assert_eq!(navigator.advance().map(|e| e.id), Some(EpisodeId::new(2)));
        assert_eq!(navigator.advance().map(|e| e.id), Some(EpisodeId::new(3)));
        assert!(navigator.is_last_episode());
        assert!(navigator.advance().is_none());
        assert_eq!(navigator.current_episode().map(|e| e.id), Some(EpisodeId::new(3)));
    }

    #[test]
    fn test_override_wins_until_next_selection() {
        let mut navigator = EpisodeNavigator::new(two_seasons(), None);
        navigator.select(episode(1, 1, 1));

        navigator.set_override(Some(episode(3, 2, 1)));
        assert_eq!(navigator.current_episode().map(|e| e.id), Some(EpisodeId::new(3)));
        assert!(navigator.next_episode().is_none());

        navigator.select(episode(2, 1, 2));
        assert_eq!(navigator.current_episode().map(|e| e.id), Some(EpisodeId::new(2)));
        assert_eq!(navigator.next_episode().map(|e| e.id), Some(EpisodeId::new(3)));
    }

    #[test]
    fn test_previous_episode() {
        let mut navigator = EpisodeNavigator::new(two_seasons(), Some(episode(3, 2, 1)));
        assert_eq!(navigator.previous_episode().map(|e| e.id), Some(EpisodeId::new(2)));
        navigator.go_back();
        navigator.go_back();
        assert!(navigator.go_back().is_none());
        assert_eq!(navigator.current_episode().map(|e| e.id), Some(EpisodeId::new(1)));
    }
}
