use chrono::{DateTime, Datelike, TimeZone};
use std::fmt::Display;

const DATE_FORMAT: &str = "%b %e %H:%M";
const DATE_YEAR_FORMAT: &str = "%b %e  %Y";

const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

/// `drwxr-xr-x` style permission string for raw `st_mode` bits.
pub fn mode_string(mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        S_IFCHR => 'c',
        S_IFBLK => 'b',
        S_IFIFO => 'p',
        S_IFSOCK => 's',
        _ => '-',
    });

    let specials = [(S_ISUID, 's'), (S_ISGID, 's'), (S_ISVTX, 't')];
    for (triple, (special_bit, special_char)) in specials.into_iter().enumerate() {
        let shift = 6 - triple * 3;
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        let executable = bits & 0o1 != 0;
        out.push(match (mode & special_bit != 0, executable) {
            (true, true) => special_char,
            (true, false) => special_char.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    out
}

/// Same-year dates show the time of day; older ones show the year instead.
pub fn format_date<Tz>(modified: &DateTime<Tz>, current_year: i32) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if modified.year() == current_year {
        modified.format(DATE_FORMAT).to_string()
    } else {
        modified.format(DATE_YEAR_FORMAT).to_string()
    }
}
