//! Sprite-sheet animation
//!
//! Clips are ordered lists of sheet frame indices played at a fixed
//! frame rate. An `Animator` tracks which clip a sprite is showing and
//! where it is inside it; the renderer asks it for the current frame.

use std::collections::HashMap;

/// Named clips of the knight sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimKey {
    /// Walk left
    Left,
    /// Idle, facing the camera
    Turn,
    /// Walk right
    Right,
}

impl AnimKey {
    pub fn name(&self) -> &'static str {
        match self {
            AnimKey::Left => "left",
            AnimKey::Turn => "turn",
            AnimKey::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Loop,
    /// Hold the last frame
    Once,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub frames: Vec<u32>,
    pub frame_rate: f32,
    pub repeat: Repeat,
}

impl AnimationClip {
    /// Consecutive sheet frames `start..=end`.
    pub fn range(start: u32, end: u32, frame_rate: f32, repeat: Repeat) -> Self {
        Self { frames: (start..=end).collect(), frame_rate, repeat }
    }

    pub fn single(frame: u32, frame_rate: f32) -> Self {
        Self { frames: vec![frame], frame_rate, repeat: Repeat::Once }
    }

    fn frame_duration(&self) -> f32 {
        if self.frame_rate > 0.0 { 1.0 / self.frame_rate } else { f32::INFINITY }
    }
}

/// Clip registry for one sprite sheet.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: HashMap<AnimKey, AnimationClip>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The knight sheet: 9 frames, walk-left 0-3, idle 4, walk-right 5-8.
    pub fn knight() -> Self {
        let mut set = Self::new();
        set.insert(AnimKey::Left, AnimationClip::range(0, 3, 10.0, Repeat::Loop));
        set.insert(AnimKey::Turn, AnimationClip::single(4, 20.0));
        set.insert(AnimKey::Right, AnimationClip::range(5, 8, 10.0, Repeat::Loop));
        set
    }

    pub fn insert(&mut self, key: AnimKey, clip: AnimationClip) {
        self.clips.insert(key, clip);
    }

    pub fn get(&self, key: AnimKey) -> Option<&AnimationClip> {
        self.clips.get(&key)
    }
}

/// Playback state of one sprite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animator {
    current: Option<AnimKey>,
    frame_index: usize,
    elapsed: f32,
    /// Number of `play` calls that (re)started a clip
    starts: u32,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `key` from its first frame. With `ignore_if_playing` an
    /// already-running `key` keeps its position.
    pub fn play(&mut self, key: AnimKey, ignore_if_playing: bool) {
        if ignore_if_playing && self.current == Some(key) {
            return;
        }
        self.current = Some(key);
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.starts += 1;
    }

    pub fn current(&self) -> Option<AnimKey> {
        self.current
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn advance(&mut self, dt: f32, set: &AnimationSet) {
        let Some(clip) = self.current.and_then(|key| set.get(key)) else { return };
        if clip.frames.is_empty() {
            return;
        }

        let duration = clip.frame_duration();
        self.elapsed += dt;
        while self.elapsed >= duration {
            self.elapsed -= duration;
            let last = clip.frames.len() - 1;
            if self.frame_index < last {
                self.frame_index += 1;
            } else if clip.repeat == Repeat::Loop {
                self.frame_index = 0;
            } else {
                self.elapsed = 0.0;
                break;
            }
        }
    }

    /// Sheet frame to draw, or `None` before anything was played.
    pub fn frame(&self, set: &AnimationSet) -> Option<u32> {
        let clip = set.get(self.current?)?;
        clip.frames.get(self.frame_index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_loop_wraps() {
        let set = AnimationSet::knight();
        let mut anim = Animator::new();
        anim.play(AnimKey::Left, true);
        assert_eq!(anim.frame(&set), Some(0));

        // 10 fps: 0.35s is three and a half frames in
        anim.advance(0.35, &set);
        assert_eq!(anim.frame(&set), Some(3));

        anim.advance(0.1, &set);
        assert_eq!(anim.frame(&set), Some(0));
    }

    #[test]
    fn test_single_frame_clip_holds() {
        let set = AnimationSet::knight();
        let mut anim = Animator::new();
        anim.play(AnimKey::Turn, false);
        anim.advance(5.0, &set);
        assert_eq!(anim.frame(&set), Some(4));
    }

    #[test]
    fn test_ignore_if_playing_keeps_position() {
        let set = AnimationSet::knight();
        let mut anim = Animator::new();
        anim.play(AnimKey::Right, true);
        anim.advance(0.15, &set);
        assert_eq!(anim.frame(&set), Some(6));

        anim.play(AnimKey::Right, true);
        assert_eq!(anim.frame(&set), Some(6));
        assert_eq!(anim.starts(), 1);

        anim.play(AnimKey::Right, false);
        assert_eq!(anim.frame(&set), Some(5));
        assert_eq!(anim.starts(), 2);
    }

    #[test]
    fn test_switching_clip_restarts() {
        let set = AnimationSet::knight();
        let mut anim = Animator::new();
        anim.play(AnimKey::Left, true);
        anim.advance(0.25, &set);
        anim.play(AnimKey::Right, true);
        assert_eq!(anim.current(), Some(AnimKey::Right));
        assert_eq!(anim.frame(&set), Some(5));
    }

    #[test]
    fn test_nothing_played() {
        let set = AnimationSet::knight();
        let anim = Animator::new();
        assert_eq!(anim.frame(&set), None);
        assert_eq!(AnimKey::Turn.name(), "turn");
    }
}
