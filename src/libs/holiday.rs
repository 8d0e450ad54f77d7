//! Special-day banners.

const SPECIAL_DAYS: &[((u32, u32), &str)] = &[
    ((1, 1), "Happy New Year! Welcome the year, celebrate, take it easy today."),
    ((2, 14), "It's Valentine's Day. Gifts, a nice dinner, maybe close the laptop early?"),
    ((3, 8), "It's International Women's Day. Flowers and appreciation are in order."),
    ((4, 1), "It's April Fools' Day. Trust no green build today."),
    ((5, 1), "It's Labour Day. Celebrate the workers, then go rest."),
    ((6, 1), "It's Children's Day. Be a kid for a while."),
    ((9, 10), "It's Teachers' Day. Thank someone who taught you something."),
    ((10, 1), "It's National Day. Fireworks, parades and a long weekend."),
    ((12, 25), "Merry Christmas! Presents, family and absolutely no deploys."),
];

/// Banner text for a month/day pair, if it is a special day.
pub fn special_day(month: u32, day: u32) -> Option<&'static str> {
    SPECIAL_DAYS
        .iter()
        .find(|((m, d), _)| *m == month && *d == day)
        .map(|(_, text)| *text)
}
