//! Универсальная проекция списков: фильтрация по подстроке и сортировка.
//!
//! Функции чистые: вход не изменяется, результат зависит только от аргументов.
//! Фильтр и сортировка коммутируют, поэтому порядок их применения не важен.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    /// Применить направление к результату сравнения по возрастанию
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Индикатор для заголовка колонки
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    }
}

/// Замкнутый набор сортируемых полей сущности
pub trait SortField: Copy + Eq + Debug + 'static {
    /// Путь к полю: `title`, `stock.available`
    fn path(&self) -> &'static str;

    /// Естественное направление для поля (тексты по возрастанию, количества и даты по убыванию)
    fn natural_direction(&self) -> SortDirection;

    /// Все поля в порядке колонок таблицы
    fn all() -> &'static [Self];

    fn from_path(path: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.path() == path)
    }
}

/// Значение поля, приведённое к сравнимому виду
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Integer(i64),
    Decimal(f64),
    Text(Cow<'a, str>),
    Instant(DateTime<Utc>),
    /// Значения нет (null/undefined); всегда после присутствующих
    Missing,
}

impl<'a> SortValue<'a> {
    pub fn text(s: &'a str) -> Self {
        SortValue::Text(Cow::Borrowed(s))
    }

    pub fn opt_text(s: Option<&'a str>) -> Self {
        s.map_or(SortValue::Missing, SortValue::text)
    }

    pub fn opt_instant(dt: Option<DateTime<Utc>>) -> Self {
        dt.map_or(SortValue::Missing, SortValue::Instant)
    }

    pub fn opt_decimal(v: Option<f64>) -> Self {
        match v {
            Some(v) if !v.is_nan() => SortValue::Decimal(v),
            _ => SortValue::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SortValue::Missing)
    }

    fn kind_rank(&self) -> u8 {
        match self {
            SortValue::Integer(_) | SortValue::Decimal(_) => 0,
            SortValue::Instant(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Missing => 3,
        }
    }
}

/// Сравнение присутствующих значений по возрастанию
pub fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    use SortValue::*;
    match (a, b) {
        (Integer(x), Integer(y)) => x.cmp(y),
        (Decimal(x), Decimal(y)) => x.total_cmp(y),
        (Integer(x), Decimal(y)) => (*x as f64).total_cmp(y),
        (Decimal(x), Integer(y)) => x.total_cmp(&(*y as f64)),
        (Text(x), Text(y)) => compare_text(x, y),
        (Instant(x), Instant(y)) => x.cmp(y),
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Сравнение с учётом направления; пропущенные значения всегда в конце
pub fn compare_directed(a: &SortValue<'_>, b: &SortValue<'_>, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(compare_values(a, b)),
    }
}

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    type SearchField: Copy + 'static;

    /// Текст поля для поиска и подсветки
    fn search_text(&self, field: Self::SearchField) -> Option<Cow<'_, str>>;

    /// Проверяет, содержит ли хотя бы одно из полей подстроку (без учёта регистра)
    fn matches_filter(&self, filter: &str, fields: &[Self::SearchField]) -> bool {
        if filter.is_empty() {
            return true;
        }
        fields.iter().any(|field| {
            self.search_text(*field)
                .is_some_and(|text| contains_match(&text, filter))
        })
    }
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    type SortField: SortField;

    fn sort_value(&self, field: Self::SortField) -> SortValue<'_>;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(
        &self,
        other: &Self,
        field: Self::SortField,
        direction: SortDirection,
    ) -> Ordering {
        compare_directed(&self.sort_value(field), &other.sort_value(field), direction)
    }
}

/// Активная сортировка списка (ровно одна на представление)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Какое направление получает новое поле при переключении
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionPolicy {
    Fixed(SortDirection),
    Natural,
}

impl DirectionPolicy {
    pub fn direction_for<F: SortField>(self, field: F) -> SortDirection {
        match self {
            DirectionPolicy::Fixed(direction) => direction,
            DirectionPolicy::Natural => field.natural_direction(),
        }
    }
}

impl<F: SortField> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: F) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: F) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Клик по заголовку: то же поле меняет направление, новое поле получает направление по политике
    pub fn toggle(self, field: F, policy: DirectionPolicy) -> Self {
        if field == self.field {
            Self::new(field, self.direction.flip())
        } else {
            Self::new(field, policy.direction_for(field))
        }
    }

    /// Индикатор для колонки: направление у активной, нейтральный у остальных
    pub fn indicator(&self, field: F) -> &'static str {
        if field == self.field {
            self.direction.indicator()
        } else {
            " ⇅"
        }
    }
}

/// Отфильтровать и отсортировать снимок списка.
///
/// Сортировка стабильная: при равенстве сохраняется исходный порядок.
pub fn project<T>(
    items: &[T],
    search: &str,
    fields: &[T::SearchField],
    sort: SortSpec<<T as Sortable>::SortField>,
) -> Vec<T>
where
    T: Searchable + Sortable + Clone,
{
    let mut result: Vec<T> = items
        .iter()
        .filter(|item| item.matches_filter(search, fields))
        .cloned()
        .collect();
    result.sort_by(|a, b| a.compare_by_field(b, sort.field, sort.direction));
    result
}

/// Настройки списка конкретной страницы
pub struct ListConfig<T: Searchable + Sortable + 'static> {
    pub search_fields: &'static [T::SearchField],
    pub initial_sort: SortSpec<<T as Sortable>::SortField>,
    pub new_field_direction: DirectionPolicy,
}

impl<T: Searchable + Sortable + 'static> Clone for ListConfig<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Searchable + Sortable + 'static> Copy for ListConfig<T> {}

impl<T: Searchable + Sortable + Clone + 'static> ListConfig<T> {
    pub fn project(&self, items: &[T], search: &str, sort: SortSpec<<T as Sortable>::SortField>) -> Vec<T> {
        project(items, search, self.search_fields, sort)
    }

    pub fn toggle(
        &self,
        current: SortSpec<<T as Sortable>::SortField>,
        field: <T as Sortable>::SortField,
    ) -> SortSpec<<T as Sortable>::SortField> {
        current.toggle(field, self.new_field_direction)
    }
}

/// Разбить текст на фрагменты для подсветки совпадений (без учёта регистра).
///
/// Второй элемент пары `true` у совпавших фрагментов. Склейка фрагментов даёт исходный текст.
pub fn match_segments<'a>(text: &'a str, filter: &str) -> Vec<(&'a str, bool)> {
    let needle = lowered(filter);
    if needle.is_empty() {
        return vec![(text, false)];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        match match_end(text, pos, &needle) {
            Some(end) => {
                if plain_start < pos {
                    segments.push((&text[plain_start..pos], false));
                }
                segments.push((&text[pos..end], true));
                pos = end;
                plain_start = end;
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if plain_start < text.len() {
        segments.push((&text[plain_start..], false));
    }
    segments
}

/// Есть ли в тексте совпадение с фильтром; пустой фильтр совпадает со всем.
///
/// Регистр сводится так же, как в [`match_segments`]: что найдено, то и подсвечено.
pub fn contains_match(text: &str, filter: &str) -> bool {
    let needle = lowered(filter);
    if needle.is_empty() {
        return true;
    }
    text.char_indices()
        .any(|(pos, _)| match_end(text, pos, &needle).is_some())
}

fn lowered(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Конец совпадения, начинающегося с `start`. Символ, строчная форма которого
/// длиннее остатка фильтра (`İ` -> `i̇`), засчитывается целиком.
fn match_end(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut lowered: Vec<char> = Vec::with_capacity(needle.len());
    for (offset, ch) in text[start..].char_indices() {
        lowered.extend(ch.to_lowercase());
        if lowered.len() >= needle.len() {
            return lowered
                .starts_with(needle)
                .then_some(start + offset + ch.len_utf8());
        }
        if !needle.starts_with(&lowered) {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        title: &'static str,
        price: Option<f64>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RowField {
        Id,
        Title,
        Price,
    }

    impl SortField for RowField {
        fn path(&self) -> &'static str {
            match self {
                RowField::Id => "id",
                RowField::Title => "title",
                RowField::Price => "meta.price",
            }
        }

        fn natural_direction(&self) -> SortDirection {
            match self {
                RowField::Title => SortDirection::Ascending,
                _ => SortDirection::Descending,
            }
        }

        fn all() -> &'static [Self] {
            &[RowField::Id, RowField::Title, RowField::Price]
        }
    }

    impl Searchable for Row {
        type SearchField = RowField;

        fn search_text(&self, field: RowField) -> Option<Cow<'_, str>> {
            match field {
                RowField::Title => Some(Cow::Borrowed(self.title)),
                RowField::Id => Some(Cow::Owned(self.id.to_string())),
                RowField::Price => None,
            }
        }
    }

    impl Sortable for Row {
        type SortField = RowField;

        fn sort_value(&self, field: RowField) -> SortValue<'_> {
            match field {
                RowField::Id => SortValue::Integer(self.id),
                RowField::Title => SortValue::text(self.title),
                RowField::Price => SortValue::opt_decimal(self.price),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, title: "beta", price: Some(10.0) },
            Row { id: 2, title: "Alpha", price: None },
            Row { id: 3, title: "alpha", price: Some(2.5) },
            Row { id: 4, title: "Gamma", price: Some(10.0) },
        ]
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let items = rows();
        let out = project(&items, "", &[RowField::Title], SortSpec::ascending(RowField::Id));
        assert_eq!(out, items);
    }

    #[test]
    fn test_filter_is_case_insensitive_over_listed_fields() {
        let items = rows();
        let out = project(&items, "ALP", &[RowField::Title], SortSpec::ascending(RowField::Id));
        assert_eq!(ids(&out), vec![2, 3]);

        // id не входит в поля поиска
        let out = project(&items, "4", &[RowField::Title], SortSpec::ascending(RowField::Id));
        assert!(out.is_empty());
        let out = project(&items, "4", &[RowField::Title, RowField::Id], SortSpec::ascending(RowField::Id));
        assert_eq!(ids(&out), vec![4]);
    }

    #[test]
    fn test_text_sort_ignores_case_and_is_stable() {
        let items = rows();
        let out = project(&items, "", &[], SortSpec::ascending(RowField::Title));
        // "Alpha" и "alpha" равны, сохраняется исходный порядок 2, 3
        assert_eq!(ids(&out), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let items = rows();
        let asc = project(&items, "", &[], SortSpec::ascending(RowField::Price));
        assert_eq!(ids(&asc), vec![3, 1, 4, 2]);
        let desc = project(&items, "", &[], SortSpec::descending(RowField::Price));
        assert_eq!(ids(&desc), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let items = rows();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let out = project(&items, "", &[], SortSpec::new(RowField::Price, direction));
            assert_eq!(out.last().map(|r| r.id), Some(2));
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let items = rows();
        let sort = SortSpec::descending(RowField::Title);
        let once = project(&items, "a", &[RowField::Title], sort);
        let twice = project(&once, "a", &[RowField::Title], sort);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_projection_is_a_permutation_of_the_filtered_input() {
        let items = rows();
        let mut projected = ids(&project(&items, "", &[], SortSpec::descending(RowField::Id)));
        projected.sort();
        assert_eq!(projected, ids(&items));
    }

    #[test]
    fn test_filter_and_sort_commute() {
        let items = rows();
        let sort = SortSpec::ascending(RowField::Title);
        let sorted_first = project(&project(&items, "", &[], sort), "a", &[RowField::Title], sort);
        let filtered_first = project(&project(&items, "a", &[RowField::Title], sort), "", &[], sort);
        assert_eq!(sorted_first, filtered_first);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let items = rows();
        let before = items.clone();
        let _ = project(&items, "ga", &[RowField::Title], SortSpec::descending(RowField::Id));
        assert_eq!(items, before);
    }

    #[test]
    fn test_toggle_same_field_flips_direction() {
        let spec = SortSpec::ascending(RowField::Title);
        let spec = spec.toggle(RowField::Title, DirectionPolicy::Fixed(SortDirection::Ascending));
        assert_eq!(spec.direction, SortDirection::Descending);
        let spec = spec.toggle(RowField::Title, DirectionPolicy::Fixed(SortDirection::Ascending));
        assert_eq!(spec.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_new_field_uses_policy() {
        let spec = SortSpec::ascending(RowField::Title);
        let fixed = spec.toggle(RowField::Id, DirectionPolicy::Fixed(SortDirection::Ascending));
        assert_eq!(fixed, SortSpec::ascending(RowField::Id));
        let natural = spec.toggle(RowField::Id, DirectionPolicy::Natural);
        assert_eq!(natural, SortSpec::descending(RowField::Id));
    }

    #[test]
    fn test_field_paths() {
        assert_eq!(RowField::from_path("meta.price"), Some(RowField::Price));
        assert_eq!(RowField::from_path("unknown"), None);
    }

    #[test]
    fn test_match_segments_highlights_every_occurrence() {
        let segments = match_segments("Alpha alpha", "al");
        assert_eq!(
            segments,
            vec![("Al", true), ("pha ", false), ("al", true), ("pha", false)]
        );
        let joined: String = segments.iter().map(|(s, _)| *s).collect();
        assert_eq!(joined, "Alpha alpha");
    }

    #[test]
    fn test_match_segments_non_ascii() {
        assert_eq!(
            match_segments("Смартфон Galaxy", "смарт"),
            vec![("Смарт", true), ("фон Galaxy", false)]
        );
        assert_eq!(match_segments("abc", ""), vec![("abc", false)]);
        assert_eq!(match_segments("abc", "x"), vec![("abc", false)]);
    }

    #[test]
    fn test_search_and_highlight_agree_on_expanding_lowercase() {
        assert_eq!(match_segments("İstanbul", "i"), vec![("İ", true), ("stanbul", false)]);
        for (text, filter) in [
            ("İstanbul", "i"),
            ("İstanbul", "İST"),
            ("ΟΔΟΣ", "σ"),
            ("Straße", "SS"),
            ("Galaxy", "LAX"),
        ] {
            let highlighted = match_segments(text, filter).iter().any(|(_, hit)| *hit);
            assert_eq!(contains_match(text, filter), highlighted, "{} / {}", text, filter);
        }
        assert!(contains_match("anything", ""));
    }
}
