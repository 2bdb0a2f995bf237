use leptos::prelude::*;

/// Столбец графика: подпись, значение, подсказка
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
    pub tooltip: String,
}

/// Простая столбчатая диаграмма на div-ах; высота столбцов относительно максимума
#[component]
pub fn BarChart(
    #[prop(into)]
    points: Signal<Vec<BarPoint>>,
    #[prop(optional, into)]
    empty_text: MaybeProp<String>,
) -> impl IntoView {
    move || {
        let points = points.get();
        if points.is_empty() {
            let text = empty_text.get().unwrap_or_else(|| "Нет данных за период".to_string());
            return view! { <div class="bar-chart__empty">{text}</div> }.into_any();
        }
        let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
        view! {
            <div class="bar-chart">
                {points
                    .into_iter()
                    .map(|point| {
                        let percent = if max > 0.0 { point.value / max * 100.0 } else { 0.0 };
                        view! {
                            <div class="bar-chart__column" title=point.tooltip>
                                <div class="bar-chart__bar" style=format!("height: {:.1}%;", percent)></div>
                                <div class="bar-chart__label">{point.label}</div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    }
}
