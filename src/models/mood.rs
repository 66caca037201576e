use serde::Serialize;

/// One mood in the static catalog. `file` names the emoji asset served by the
/// front end.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Mood {
    pub id: i32,
    pub name: &'static str,
    pub file: &'static str,
}

/// The full catalog, in id order. Fixed at compile time; never mutated.
pub const MOODS: [Mood; 40] = [
    Mood { id: 1, name: "Happy", file: "1_Happy.png" },
    Mood { id: 2, name: "Sad", file: "2_Sad.png" },
    Mood { id: 3, name: "Angry", file: "3_Angry.png" },
    Mood { id: 4, name: "Anxious", file: "4_Anxious.png" },
    Mood { id: 5, name: "Stressed", file: "5_Stressed.png" },
    Mood { id: 6, name: "Calm", file: "6_Calm.png" },
    Mood { id: 7, name: "Excited", file: "7_Excited.png" },
    Mood { id: 8, name: "Bored", file: "8_Bored.png" },
    Mood { id: 9, name: "Tired", file: "9_Tired.png" },
    Mood { id: 10, name: "Energetic", file: "10_Energetic.png" },
    Mood { id: 11, name: "Motivated", file: "11_Motivated.png" },
    Mood { id: 12, name: "Unmotivated", file: "12_Unmotivated.png" },
    Mood { id: 13, name: "Focused", file: "13_Focused.png" },
    Mood { id: 14, name: "Distracted", file: "14_Distracted.png" },
    Mood { id: 15, name: "Confused", file: "15_Confused.png" },
    Mood { id: 16, name: "Overwhelmed", file: "16_Overwhelmed.png" },
    Mood { id: 17, name: "Relaxed", file: "17_Relaxed.png" },
    Mood { id: 18, name: "Lonely", file: "18_Lonely.png" },
    Mood { id: 19, name: "Hopeful", file: "19_Hopeful.png" },
    Mood { id: 20, name: "Grateful", file: "20_Grateful.png" },
    Mood { id: 21, name: "Frustrated", file: "21_Frustrated.png" },
    Mood { id: 22, name: "Irritated", file: "22_Irritated.png" },
    Mood { id: 23, name: "Confident", file: "23_Confident.png" },
    Mood { id: 24, name: "Nervous", file: "24_Nervous.png" },
    Mood { id: 25, name: "Scared", file: "25_Scared.png" },
    Mood { id: 26, name: "Shocked", file: "26_Shocked.png" },
    Mood { id: 27, name: "Proud", file: "27_Proud.png" },
    Mood { id: 28, name: "Disappointed", file: "28_Disappointed.png" },
    Mood { id: 29, name: "Guilty", file: "29_Guilty.png" },
    Mood { id: 30, name: "Peaceful", file: "30_Peaceful.png" },
    Mood { id: 31, name: "Love", file: "31_Love.png" },
    Mood { id: 32, name: "Heartbroken", file: "32_Heartbroken.png" },
    Mood { id: 33, name: "Inspired", file: "33_Inspired.png" },
    Mood { id: 34, name: "Productive", file: "34_Productive.png" },
    Mood { id: 35, name: "Lazy", file: "35_Lazy.png" },
    Mood { id: 36, name: "Sick", file: "36_Sick.png" },
    Mood { id: 37, name: "Disgusted", file: "37_Disgusted.png" },
    Mood { id: 38, name: "Sleepy", file: "38_Sleepy.png" },
    Mood { id: 39, name: "Restless", file: "39_Restless.png" },
    Mood { id: 40, name: "Neutral", file: "40_Neutral.png" },
];

/// Look up a mood by id. Ids outside 1..=40 have no catalog entry.
pub fn mood_by_id(id: i32) -> Option<&'static Mood> {
    if !(1..=40).contains(&id) {
        return None;
    }
    MOODS.get((id - 1) as usize)
}

pub fn all_moods() -> &'static [Mood] {
    &MOODS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_sequential() {
        for (i, mood) in MOODS.iter().enumerate() {
            assert_eq!(mood.id, i as i32 + 1);
        }
    }

    #[test]
    fn test_lookup_in_bounds() {
        assert_eq!(mood_by_id(1).map(|m| m.name), Some("Happy"));
        assert_eq!(mood_by_id(40).map(|m| m.name), Some("Neutral"));
    }

    #[test]
    fn test_lookup_out_of_bounds() {
        assert!(mood_by_id(0).is_none());
        assert!(mood_by_id(41).is_none());
        assert!(mood_by_id(-3).is_none());
    }

    #[test]
    fn test_all_moods_len() {
        assert_eq!(all_moods().len(), 40);
    }
}
