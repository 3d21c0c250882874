use crate::league::Modality;

/// Point value of a long-range make per modality.
pub const LONG_RANGE_POINTS: &[(Modality, u8)] = &[
    (Modality::ThreeOnThree, 2),
    (Modality::FiveOnFive, 3),
];

pub fn long_range_points(modality: Modality) -> Option<u8> {
    LONG_RANGE_POINTS
        .iter()
        .find(|(m, _)| *m == modality)
        .map(|(_, points)| *points)
}

pub fn is_long_range(points: u8, modality: Modality) -> bool {
    long_range_points(modality) == Some(points)
}
