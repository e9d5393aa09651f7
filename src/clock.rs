//! Источник текущего времени для меток `creation`/`lastaccess`/`lastmod`.
//!
//! Рендерер не обращается к системным часам напрямую, а получает [`Clock`],
//! поэтому в тестах время можно зафиксировать.

use chrono::{Local, NaiveDateTime};

pub trait Clock {
    /// Текущее локальное время.
    fn now(&self) -> NaiveDateTime;
}

/// Системные часы в локальном часовом поясе.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Часы, которые всегда показывают одно и то же время.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}
