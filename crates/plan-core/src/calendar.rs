//! 工作日曆模型
//!
//! 排程引擎的時間基礎：工作日、班別視窗與工時推進。

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 班別（名稱 + 起訖小時，允許跨午夜）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// 班別名稱（如 早班/中班/夜班）
    pub name: String,

    /// 起始小時（0-23）
    pub start_hour: u32,

    /// 結束小時（不含；start >= end 表示跨午夜）
    pub end_hour: u32,
}

impl Shift {
    /// 創建新的班別
    pub fn new(name: impl Into<String>, start_hour: u32, end_hour: u32) -> Self {
        Self {
            name: name.into(),
            start_hour,
            end_hour,
        }
    }

    /// 檢查某小時是否落在班別視窗內（[start, end)，跨午夜時換向判斷）
    pub fn contains_hour(&self, hour: u32) -> bool {
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// 工作日曆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingCalendar {
    /// 工作日（週一到週日，true表示工作日）
    /// 索引 0 = 週一, 1 = 週二, ..., 6 = 週日
    pub working_days: [bool; 7],

    /// 節假日列表
    pub holidays: Vec<NaiveDate>,

    /// 班別列表（至少一個；shift_for 找不到時退回第一個）
    pub shifts: Vec<Shift>,

    /// 每日開工小時
    pub day_start_hour: u32,

    /// 每日收工小時（不含；24 表示到午夜）
    pub day_end_hour: u32,
}

impl WorkingCalendar {
    /// 創建新的工作日曆（預設週一到週六開工，08:00–24:00，三班制）
    pub fn new() -> Self {
        Self {
            working_days: [true, true, true, true, true, true, false], // 週一到週六
            holidays: Vec::new(),
            shifts: vec![
                Shift::new("早班", 8, 16),
                Shift::new("中班", 16, 24),
                Shift::new("夜班", 0, 8),
            ],
            day_start_hour: 8,
            day_end_hour: 24,
        }
    }

    /// 創建 24/7 日曆（所有日子都是工作日，全天開工）
    pub fn new_24_7() -> Self {
        Self {
            working_days: [true; 7],
            holidays: Vec::new(),
            shifts: vec![
                Shift::new("早班", 0, 8),
                Shift::new("中班", 8, 16),
                Shift::new("夜班", 16, 24),
            ],
            day_start_hour: 0,
            day_end_hour: 24,
        }
    }

    /// 建構器模式：設置工作日
    pub fn with_working_days(mut self, working_days: [bool; 7]) -> Self {
        self.working_days = working_days;
        self
    }

    /// 建構器模式：設置班別
    pub fn with_shifts(mut self, shifts: Vec<Shift>) -> Self {
        self.shifts = shifts;
        self
    }

    /// 建構器模式：設置每日開工/收工小時
    pub fn with_day_window(mut self, day_start_hour: u32, day_end_hour: u32) -> Self {
        self.day_start_hour = day_start_hour;
        self.day_end_hour = day_end_hour;
        self
    }

    /// 建構器模式：添加節假日
    pub fn with_holidays(mut self, holidays: Vec<NaiveDate>) -> Self {
        self.holidays = holidays;
        self
    }

    /// 添加節假日
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if !self.holidays.contains(&date) {
            self.holidays.push(date);
            self.holidays.sort();
        }
    }

    /// 檢查是否為工作日
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        // 檢查是否為節假日
        if self.holidays.contains(&date) {
            return false;
        }

        // 檢查是否為工作日
        let weekday_index = date.weekday().num_days_from_monday() as usize;
        self.working_days[weekday_index]
    }

    /// 獲取下一個工作日
    pub fn next_working_day(&self, date: NaiveDate) -> NaiveDate {
        self.add_working_days(date, 1)
    }

    /// 計算工作日（向前推算）
    pub fn add_working_days(&self, start_date: NaiveDate, days: u32) -> NaiveDate {
        let mut current = start_date;
        let mut remaining = days;

        while remaining > 0 {
            current = current.succ_opt().expect("日期溢出");
            if self.is_working_day(current) {
                remaining -= 1;
            }
        }

        current
    }

    /// 獲取某時刻所在的班別；無匹配時退回第一個班別
    pub fn shift_for(&self, time: NaiveDateTime) -> &Shift {
        let hour = time.hour();
        self.shifts
            .iter()
            .find(|shift| shift.contains_hour(hour))
            .unwrap_or_else(|| self.shifts.first().expect("未配置班別"))
    }

    /// 當日開工時刻
    fn day_start_instant(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(self.day_start_hour, 0, 0).expect("無效的開工小時")
    }

    /// 當日收工時刻（day_end_hour = 24 時為次日零點）
    fn day_end_instant(&self, date: NaiveDate) -> NaiveDateTime {
        if self.day_end_hour >= 24 {
            let next = date.succ_opt().expect("日期溢出");
            next.and_hms_opt(0, 0, 0).expect("日期溢出")
        } else {
            date.and_hms_opt(self.day_end_hour, 0, 0).expect("無效的收工小時")
        }
    }

    /// 推進到最近的有效工作時刻
    ///
    /// - 開工前：貼齊當日開工時刻
    /// - 收工後或非工作日：跳到下一個工作日的開工時刻
    /// - 已在工作視窗內：原樣返回
    pub fn advance_to_working_time(&self, time: NaiveDateTime) -> NaiveDateTime {
        let date = time.date();

        if !self.is_working_day(date) || time >= self.day_end_instant(date) {
            return self.day_start_instant(self.next_working_day(date));
        }

        if time < self.day_start_instant(date) {
            return self.day_start_instant(date);
        }

        time
    }

    /// 在工作視窗內推進指定工時
    ///
    /// 只在工作日的 [開工, 收工) 視窗內消耗時數，當日剩餘工時耗盡時
    /// 滾動到下一個工作日的開工時刻，直到時數完全消耗。
    /// 返回值必定是有效的工作時刻。
    pub fn add_working_duration(&self, start: NaiveDateTime, hours: Decimal) -> NaiveDateTime {
        // 換算為整數秒
        let total_seconds = (hours * Decimal::from(3600))
            .round()
            .to_string()
            .parse::<i64>()
            .unwrap_or(0);

        let mut current = self.advance_to_working_time(start);
        if total_seconds <= 0 {
            return current;
        }

        let mut remaining = total_seconds;
        loop {
            let day_end = self.day_end_instant(current.date());
            let available = (day_end - current).num_seconds();

            if remaining <= available {
                return current + Duration::seconds(remaining);
            }

            remaining -= available;
            current = self.day_start_instant(self.next_working_day(current.date()));
        }
    }
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        // 2025-10-06 是週一
        NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
    }

    #[test]
    fn test_create_calendar() {
        let calendar = WorkingCalendar::new();

        // 週一到週六應該是工作日
        assert!(calendar.is_working_day(monday()));
        let saturday = NaiveDate::from_ymd_opt(2025, 10, 11).unwrap();
        assert!(calendar.is_working_day(saturday));
        let sunday = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
        assert!(!calendar.is_working_day(sunday));
    }

    #[test]
    fn test_holidays() {
        let mut calendar = WorkingCalendar::new();

        let holiday = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(); // 國慶日
        calendar.add_holiday(holiday);

        assert!(!calendar.is_working_day(holiday));
    }

    #[test]
    fn test_next_working_day_skips_sunday_and_holiday() {
        let saturday = NaiveDate::from_ymd_opt(2025, 10, 11).unwrap();
        let next_monday = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();

        let mut calendar = WorkingCalendar::new();
        assert_eq!(calendar.next_working_day(saturday), next_monday);

        // 下週一也放假時應跳到週二
        calendar.add_holiday(next_monday);
        assert_eq!(
            calendar.next_working_day(saturday),
            NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()
        );
    }

    #[test]
    fn test_shift_for() {
        let calendar = WorkingCalendar::new();

        let morning = monday().and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(calendar.shift_for(morning).name, "早班");

        let evening = monday().and_hms_opt(18, 0, 0).unwrap();
        assert_eq!(calendar.shift_for(evening).name, "中班");

        let late = monday().and_hms_opt(2, 0, 0).unwrap();
        assert_eq!(calendar.shift_for(late).name, "夜班");
    }

    #[test]
    fn test_shift_wraparound_and_fallback() {
        let calendar = WorkingCalendar::new().with_shifts(vec![
            Shift::new("白班", 8, 20),
            Shift::new("夜班", 22, 6), // 跨午夜
        ]);

        let night = monday().and_hms_opt(23, 0, 0).unwrap();
        assert_eq!(calendar.shift_for(night).name, "夜班");

        let small_hours = monday().and_hms_opt(3, 0, 0).unwrap();
        assert_eq!(calendar.shift_for(small_hours).name, "夜班");

        // 20:00–22:00 不屬於任何班別，退回第一個
        let gap = monday().and_hms_opt(21, 0, 0).unwrap();
        assert_eq!(calendar.shift_for(gap).name, "白班");
    }

    #[test]
    fn test_advance_to_working_time() {
        let calendar = WorkingCalendar::new();

        // 開工前 → 貼齊當日 08:00
        let early = monday().and_hms_opt(6, 0, 0).unwrap();
        assert_eq!(
            calendar.advance_to_working_time(early),
            monday().and_hms_opt(8, 0, 0).unwrap()
        );

        // 視窗內 → 原樣返回
        let inside = monday().and_hms_opt(10, 15, 0).unwrap();
        assert_eq!(calendar.advance_to_working_time(inside), inside);

        // 週日 → 下週一 08:00
        let sunday = NaiveDate::from_ymd_opt(2025, 10, 12)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(
            calendar.advance_to_working_time(sunday),
            NaiveDate::from_ymd_opt(2025, 10, 13)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_advance_after_day_end() {
        // 收工時間 20:00 的日曆
        let calendar = WorkingCalendar::new().with_day_window(8, 20);

        let late = monday().and_hms_opt(20, 30, 0).unwrap();
        assert_eq!(
            calendar.advance_to_working_time(late),
            NaiveDate::from_ymd_opt(2025, 10, 7)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_add_working_duration_same_day() {
        let calendar = WorkingCalendar::new();

        let start = monday().and_hms_opt(8, 0, 0).unwrap();
        let end = calendar.add_working_duration(start, Decimal::new(35, 1)); // 3.5 小時
        assert_eq!(end, monday().and_hms_opt(11, 30, 0).unwrap());
    }

    #[test]
    fn test_add_working_duration_rolls_to_next_day() {
        // 每日 8:00–20:00，共 12 小時
        let calendar = WorkingCalendar::new().with_day_window(8, 20);

        let start = monday().and_hms_opt(14, 0, 0).unwrap();
        // 當日剩 6 小時，再需 4 小時 → 次日 12:00
        let end = calendar.add_working_duration(start, Decimal::from(10));
        assert_eq!(
            end,
            NaiveDate::from_ymd_opt(2025, 10, 7)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_add_working_duration_skips_non_working_days() {
        let calendar = WorkingCalendar::new().with_day_window(8, 20);

        // 週六 18:00 起算 4 小時：週六剩 2 小時，週日休息，週一再 2 小時
        let saturday = NaiveDate::from_ymd_opt(2025, 10, 11)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let end = calendar.add_working_duration(saturday, Decimal::from(4));
        assert_eq!(
            end,
            NaiveDate::from_ymd_opt(2025, 10, 13)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_add_working_duration_zero_hours() {
        let calendar = WorkingCalendar::new();

        let sunday = NaiveDate::from_ymd_opt(2025, 10, 12)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        // 零工時也要貼齊有效工作時刻
        let end = calendar.add_working_duration(sunday, Decimal::ZERO);
        assert_eq!(
            end,
            NaiveDate::from_ymd_opt(2025, 10, 13)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }
}
