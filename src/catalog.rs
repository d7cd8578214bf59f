//! # Curated Catalog
//!
//! A small in-memory catalog of hand-picked songs, five per mood, and the
//! [`SongSource`] seam that lets the external catalog stand in for it.
//!
//! Recommendations from the curated catalog are ranked by how close each
//! song's (valence, energy) pair lies to the mood's [`MoodProfile`]. The
//! sort is stable, so songs at equal distance keep catalog order and the
//! result is identical across calls.
//!
//! [`MoodProfile`]: crate::mood::MoodProfile

use crate::error::Result;
use crate::mood::Mood;
use crate::song::Song;
use std::cmp::Ordering;

/// Anything that can answer "give me `count` songs for this mood".
///
/// Implementations must be deterministic for the curated catalog and must
/// never return songs from another mood bucket.
pub trait SongSource: Send + Sync {
    /// Short name used in logs and the service info endpoint.
    fn name(&self) -> &'static str;

    /// Up to `count` songs for `mood`, best match first.
    fn recommend(&self, mood: Mood, count: usize) -> Result<Vec<Song>>;
}

/// The built-in curated catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalog;

impl SongSource for StaticCatalog {
    fn name(&self) -> &'static str {
        "static"
    }

    fn recommend(&self, mood: Mood, count: usize) -> Result<Vec<Song>> {
        Ok(recommend(mood, count))
    }
}

/// Up to `count` curated songs for `mood`, ranked by profile distance.
///
/// `count` is clamped to the bucket size; zero yields an empty list.
///
/// ```
/// use moodtune::catalog::recommend;
/// use moodtune::mood::Mood;
///
/// let songs = recommend(Mood::Energetic, 3);
/// assert_eq!(songs.len(), 3);
/// assert!(songs.iter().all(|s| s.mood == Mood::Energetic));
/// ```
#[must_use]
pub fn recommend(mood: Mood, count: usize) -> Vec<Song> {
    let mut ranked = songs_for(mood);
    rank_by_profile(&mut ranked, mood);
    ranked.truncate(count);
    log::debug!("Recommending {} {mood} songs", ranked.len());
    ranked
}

/// Parses `label` and recommends from the curated catalog.
///
/// # Errors
///
/// [`Error::UnknownMood`](crate::error::Error::UnknownMood) when `label` is
/// not one of the nine moods.
pub fn recommend_by_name(label: &str, count: usize) -> Result<Vec<Song>> {
    let mood: Mood = label.parse()?;
    Ok(recommend(mood, count))
}

/// Curated songs of one bucket, in catalog order.
#[must_use]
pub fn songs_for(mood: Mood) -> Vec<Song> {
    CATALOG.iter().filter(|song| song.mood == mood).cloned().collect()
}

/// Every curated song, grouped by mood in priority order.
#[must_use]
pub fn all_songs() -> &'static [Song] {
    &CATALOG
}

/// Stable sort by distance to the mood's target valence and energy.
pub fn rank_by_profile(songs: &mut [Song], mood: Mood) {
    let profile = mood.profile();
    songs.sort_by(|a, b| {
        let da = a.feature_distance(profile.target_valence, profile.target_energy);
        let db = b.feature_distance(profile.target_valence, profile.target_energy);
        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
    });
}

lazy_static::lazy_static! {
    static ref CATALOG: Vec<Song> = build_catalog();
}

fn build_catalog() -> Vec<Song> {
    use Mood::*;
    vec![
        Song::curated(Happy, "Good Vibrations", "The Beach Boys", 1966, "Pop", 0.8, 0.9, &["Classic", "Feel-good", "Upbeat"]),
        Song::curated(Happy, "Walking on Sunshine", "Katrina and the Waves", 1983, "Pop", 0.9, 0.95, &["80s", "Pop", "Energetic"]),
        Song::curated(Happy, "Happy", "Pharrell Williams", 2013, "Pop", 0.8, 0.9, &["Pop", "Dance", "Positive"]),
        Song::curated(Happy, "Don't Stop Me Now", "Queen", 1978, "Rock", 0.95, 0.85, &["Rock", "Classic", "Powerful"]),
        Song::curated(Happy, "I Wanna Dance with Somebody", "Whitney Houston", 1987, "Pop", 0.9, 0.9, &["Pop", "Dance", "80s"]),

        Song::curated(Sad, "Someone Like You", "Adele", 2011, "Pop", 0.3, 0.2, &["Ballad", "Emotional", "Piano"]),
        Song::curated(Sad, "The Night We Met", "Lord Huron", 2015, "Indie", 0.4, 0.3, &["Indie", "Melancholic", "Acoustic"]),
        Song::curated(Sad, "Hurt", "Johnny Cash", 2002, "Country", 0.3, 0.15, &["Country", "Deep", "Emotional"]),
        Song::curated(Sad, "Mad World", "Gary Jules", 2001, "Alternative", 0.2, 0.2, &["Alternative", "Somber", "Reflective"]),
        Song::curated(Sad, "Fix You", "Coldplay", 2005, "Rock", 0.5, 0.4, &["Rock", "Healing", "Hope"]),

        Song::curated(Energetic, "Eye of the Tiger", "Survivor", 1982, "Rock", 0.95, 0.75, &["Rock", "Motivational", "80s"]),
        Song::curated(Energetic, "Lose Yourself", "Eminem", 2002, "Hip-Hop", 0.9, 0.7, &["Hip-Hop", "Intense", "Powerful"]),
        Song::curated(Energetic, "Thunderstruck", "AC/DC", 1990, "Rock", 0.95, 0.8, &["Rock", "High-energy", "Classic"]),
        Song::curated(Energetic, "Till I Collapse", "Eminem ft. Nate Dogg", 2002, "Hip-Hop", 0.9, 0.75, &["Hip-Hop", "Workout", "Intense"]),
        Song::curated(Energetic, "Pump It", "The Black Eyed Peas", 2006, "Hip-Hop", 0.95, 0.8, &["Hip-Hop", "Dance", "Party"]),

        Song::curated(Calm, "Weightless", "Marconi Union", 2011, "Ambient", 0.1, 0.6, &["Ambient", "Meditation", "Peaceful"]),
        Song::curated(Calm, "Clair de Lune", "Claude Debussy", 1905, "Classical", 0.2, 0.7, &["Classical", "Piano", "Serene"]),
        Song::curated(Calm, "Breathe Me", "Sia", 2004, "Alternative", 0.3, 0.5, &["Ambient", "Gentle", "Soothing"]),
        Song::curated(Calm, "Holocene", "Bon Iver", 2011, "Indie", 0.3, 0.6, &["Indie", "Atmospheric", "Calm"]),
        Song::curated(Calm, "Intro", "The xx", 2009, "Indie", 0.25, 0.65, &["Indie", "Minimal", "Dreamy"]),

        Song::curated(Romantic, "Perfect", "Ed Sheeran", 2017, "Pop", 0.4, 0.8, &["Pop", "Love", "Ballad"]),
        Song::curated(Romantic, "All of Me", "John Legend", 2013, "R&B", 0.35, 0.75, &["R&B", "Piano", "Tender"]),
        Song::curated(Romantic, "Thinking Out Loud", "Ed Sheeran", 2014, "Pop", 0.5, 0.8, &["Pop", "Romantic", "Sweet"]),
        Song::curated(Romantic, "Can't Help Falling in Love", "Elvis Presley", 1961, "Pop", 0.3, 0.85, &["Classic", "Timeless", "Love"]),
        Song::curated(Romantic, "At Last", "Etta James", 1960, "Jazz", 0.4, 0.9, &["Jazz", "Soulful", "Classic"]),

        Song::curated(Angry, "Break Stuff", "Limp Bizkit", 1999, "Nu-Metal", 0.95, 0.3, &["Nu-Metal", "Aggressive", "Raw"]),
        Song::curated(Angry, "Killing in the Name", "Rage Against the Machine", 1992, "Rock", 0.9, 0.25, &["Rock", "Protest", "Intense"]),
        Song::curated(Angry, "In the End", "Linkin Park", 2000, "Rock", 0.8, 0.35, &["Rock", "Emotional", "Powerful"]),
        Song::curated(Angry, "Last Resort", "Papa Roach", 2000, "Nu-Metal", 0.85, 0.3, &["Nu-Metal", "Intense", "Cathartic"]),
        Song::curated(Angry, "Bodies", "Drowning Pool", 2001, "Metal", 0.95, 0.4, &["Metal", "Aggressive", "Heavy"]),

        Song::curated(Anxious, "Breathe", "Pink Floyd", 1973, "Rock", 0.4, 0.5, &["Rock", "Calming", "Progressive"]),
        Song::curated(Anxious, "Stressed Out", "Twenty One Pilots", 2015, "Alternative", 0.6, 0.4, &["Alternative", "Relatable", "Modern"]),
        Song::curated(Anxious, "Everybody Hurts", "R.E.M.", 1992, "Rock", 0.3, 0.45, &["Rock", "Comforting", "Supportive"]),
        Song::curated(Anxious, "The Scientist", "Coldplay", 2002, "Alternative", 0.4, 0.5, &["Alternative", "Reflective", "Soothing"]),
        Song::curated(Anxious, "Let It Be", "The Beatles", 1970, "Rock", 0.4, 0.6, &["Classic", "Reassuring", "Peaceful"]),

        Song::curated(Nostalgic, "Summer of '69", "Bryan Adams", 1984, "Rock", 0.75, 0.7, &["Rock", "Classic", "Throwback"]),
        Song::curated(Nostalgic, "Wonderwall", "Oasis", 1995, "Britpop", 0.6, 0.65, &["Britpop", "90s", "Iconic"]),
        Song::curated(Nostalgic, "Dream On", "Aerosmith", 1973, "Rock", 0.7, 0.6, &["Rock", "Classic", "Timeless"]),
        Song::curated(Nostalgic, "Tears in Heaven", "Eric Clapton", 1992, "Ballad", 0.3, 0.4, &["Ballad", "Emotional", "Classic"]),
        Song::curated(Nostalgic, "The Sound of Silence", "Simon & Garfunkel", 1964, "Folk", 0.3, 0.5, &["Folk", "60s", "Reflective"]),

        Song::curated(Confident, "Stronger", "Kanye West", 2007, "Hip-Hop", 0.85, 0.75, &["Hip-Hop", "Powerful", "Motivational"]),
        Song::curated(Confident, "Roar", "Katy Perry", 2013, "Pop", 0.8, 0.8, &["Pop", "Empowering", "Uplifting"]),
        Song::curated(Confident, "We Will Rock You", "Queen", 1977, "Rock", 0.9, 0.75, &["Rock", "Anthem", "Powerful"]),
        Song::curated(Confident, "Survivor", "Destiny's Child", 2001, "R&B", 0.75, 0.8, &["R&B", "Empowering", "Strong"]),
        Song::curated(Confident, "Lose Control", "Meduza, Becky Hill", 2019, "Dance", 0.9, 0.85, &["Dance", "Confident", "Energetic"]),
    ]
}
