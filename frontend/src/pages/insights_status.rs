use crate::cache::use_query;
use crate::telemetry::track_page_view;
use artshare_shared::protocol::GetInsightsStatus;
use leptos::prelude::*;

fn badge(on: bool) -> &'static str {
    if on { "✅" } else { "❌" }
}

/// Diagnostics page rendering the backend's Application Insights
/// status report.
#[component]
pub fn InsightsStatusPage() -> impl IntoView {
    track_page_view("InsightsStatus");

    let status = use_query(|| Some(GetInsightsStatus));

    view! {
        <div class="space-y-6">
            <h1 class="text-xl font-semibold text-gray-900">"Monitoring status"</h1>

            <Show when=move || status.is_loading.get() && status.data.get().is_none()>
                <div class="text-center text-gray-500 py-8">"Loading status..."</div>
            </Show>

            <Show when=move || status.error.get().is_some()>
                <div class="bg-red-50 border border-red-200 text-red-700 text-sm rounded-lg p-4">
                    {move || {
                        status.error.get().map(|e| e.user_message()).unwrap_or_default()
                    }}
                </div>
            </Show>

            <Show when=move || status.data.get().is_some()>
                {move || {
                    status
                        .data
                        .get()
                        .map(|report| {
                            let insights = report.application_insights;
                            let features = insights.enabled_features.entries();
                            view! {
                                <div class="space-y-4">
                                    <div class="bg-white border rounded-lg p-4 shadow-sm">
                                        <div class="flex items-center justify-between">
                                            <div class="font-medium text-gray-900">"Service"</div>
                                            <div class="text-sm px-2 py-1 bg-green-50 text-green-700 rounded">
                                                {report.status}
                                            </div>
                                        </div>
                                        <div class="mt-2 text-xs text-gray-500">
                                            "As of " {report.timestamp}
                                        </div>
                                    </div>

                                    <div class="bg-white border rounded-lg p-4 shadow-sm">
                                        <div class="font-medium text-gray-900 mb-3">
                                            "Application Insights"
                                        </div>
                                        <div class="grid grid-cols-2 gap-2 text-sm">
                                            <div class="text-gray-600">"Configured"</div>
                                            <div>{badge(insights.configured)}</div>
                                            <div class="text-gray-600">"Initialized"</div>
                                            <div>{badge(insights.initialized)}</div>
                                            <div class="text-gray-600">"Connection string"</div>
                                            <div class="truncate">
                                                {insights
                                                    .connection_string
                                                    .unwrap_or_else(|| "not set".to_string())}
                                            </div>
                                            <div class="text-gray-600">"Cloud role"</div>
                                            <div>
                                                {insights
                                                    .cloud_role
                                                    .unwrap_or_else(|| "unknown".to_string())}
                                            </div>
                                            <div class="text-gray-600">"Cloud role instance"</div>
                                            <div>
                                                {insights
                                                    .cloud_role_instance
                                                    .unwrap_or_else(|| "unknown".to_string())}
                                            </div>
                                        </div>
                                    </div>

                                    <div class="bg-white border rounded-lg p-4 shadow-sm">
                                        <div class="font-medium text-gray-900 mb-3">
                                            "Enabled features"
                                        </div>
                                        <div class="grid grid-cols-2 gap-2 text-sm">
                                            {features
                                                .into_iter()
                                                .map(|(label, on)| {
                                                    view! {
                                                        <div class="text-gray-600">{label}</div>
                                                        <div>{badge(on)}</div>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                }}
            </Show>
        </div>
    }
}
