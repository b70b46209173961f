static SLUG_INVALID_CHARS: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"([^a-zA-Z0-9]+)").unwrap());

/// Create a slug for a given file.  Correlates to Jekyll's `:slug` path tag
pub fn slugify<S: AsRef<str>>(name: S) -> String {
    slugify_str(name.as_ref())
}

fn slugify_str(name: &str) -> String {
    let name = deunicode::deunicode_with_tofu(name, "-");
    let slug = SLUG_INVALID_CHARS.replace_all(&name, "-");
    slug.trim_matches('-').to_lowercase()
}


pub fn split_ext(name: &str) -> (&str, Option<&str>) {
    name.rsplit_once('.')
        .map(|(n, e)| (n, Some(e)))
        .unwrap_or((name, None))
}

static DATE_PREFIX_REF: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[- ](.*))?$").unwrap()
});

/// Split a leading `YYYY-MM-DD` off of `stem`.
///
/// Jekyll names posts `2023-01-31-my-title.md`; the date is only honored when it is a real
/// calendar day.
pub fn parse_file_stem(stem: &str) -> (Option<time::Date>, String) {
    let parts = DATE_PREFIX_REF.captures(stem).and_then(|caps| {
        let year: i32 = caps[1].parse().ok()?;
        let month: u8 = caps[2].parse().ok()?;
        let day: u8 = caps[3].parse().ok()?;
        let month = time::Month::try_from(month).ok()?;
        let published = time::Date::from_calendar_date(year, month, day).ok()?;
        let rest = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
        Some((Some(published), rest.to_owned()))
    });

    parts.unwrap_or_else(|| (None, stem.to_owned()))
}

/// Parse the date portion of a front matter `date` value.
///
/// Anything after the day (time of day, offset) is ignored.
pub fn parse_date(value: &str) -> Option<time::Date> {
    let value = value.trim();
    let day = value.split([' ', 'T']).next()?;
    match parse_file_stem(day) {
        (Some(date), rest) if rest.is_empty() => Some(date),
        _ => None,
    }
}
