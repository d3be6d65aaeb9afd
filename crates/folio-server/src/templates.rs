//! Page templates, compiled into the binary.

use tera::Tera;

/// Compile every template. Called once when the site context is built.
pub fn build() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("landing.html", LANDING_TEMPLATE),
        ("listing.html", LISTING_TEMPLATE),
        ("cards.html", CARDS_TEMPLATE),
        ("detail.html", DETAIL_TEMPLATE),
        ("not_found.html", NOT_FOUND_TEMPLATE),
        ("error.html", ERROR_TEMPLATE),
    ])?;
    Ok(tera)
}

// Hrefs built from validated slugs and encoded query strings are emitted
// with `| safe`; everything else goes through autoescaping.

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en" data-theme="{{ site.theme.mode }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}{{ site.name }}{% endblock %}</title>
    <meta name="description" content="{% block description %}{{ site.description }}{% endblock %}">
    <meta property="og:title" content="{% block og_title %}{{ site.name }}{% endblock %}">
    <meta property="og:image" content="{{ og_image | safe }}">
    <meta name="twitter:card" content="summary_large_image">
    <link rel="stylesheet" href="/assets/site.css">
    <style>:root { {{ site.theme.css | safe }} }</style>
    <script src="/assets/app.js" defer></script>
</head>
<body>
    <header class="header">
        <div class="header-content">
            <a href="/" class="logo">{{ site.name }}</a>
            <nav class="nav">
                <a href="/work">{{ site.title }}</a>
            </nav>
        </div>
    </header>
    <main class="container">
        {% block content %}{% endblock %}
    </main>
    <footer class="footer">
        <span>&copy; {{ site.name }}</span>
    </footer>
</body>
</html>
"##;

const LANDING_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<section class="hero">
    <h1>{{ site.headline }}</h1>
    {% if site.intro %}<p class="hero-intro">{{ site.intro }}</p>{% endif %}
    <a href="/work" class="btn">{{ site.title }} {{ icons.arrow_right | safe }}</a>
</section>

<section class="featured">
    <h2>Featured work</h2>
    {% if cards %}
    <div class="card-grid">
        {% include "cards.html" %}
    </div>
    {% else %}
    <div class="empty">
        <p>No case studies yet. Check back later.</p>
    </div>
    {% endif %}
</section>
{% endblock %}
"##;

const LISTING_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ site.title }} - {{ site.name }}{% endblock %}
{% block og_title %}{{ site.title }}{% endblock %}
{% block content %}
<div id="listing" data-filterable>
<h1>{{ site.title }}</h1>

<section class="filters" aria-label="Filters">
    {% for facet in facets %}
    <div class="filter-group">
        <span class="filter-label">{{ icons.filter | safe }} {{ facet.label }}</span>
        <div class="pills">
            {% for pill in facet.options %}
            <a class="pill{% if pill.active %} pill-active{% endif %}" href="{{ pill.href | safe }}" data-filter-link{% if pill.active %} aria-pressed="true"{% endif %}>{{ pill.value }}</a>
            {% endfor %}
        </div>
    </div>
    {% endfor %}

    {% if active_count > 0 %}
    <div class="chips">
        <span class="badge">{{ active_count }} active</span>
        {% for chip in chips %}
        <a class="chip" href="{{ chip.href | safe }}" data-filter-link title="Remove {{ chip.label }} filter">{{ chip.value }} {{ icons.close | safe }}</a>
        {% endfor %}
        <a class="chip-clear" href="{{ clear_href | safe }}" data-filter-link>Clear all</a>
    </div>
    {% endif %}
</section>

{% if cards %}
<div id="cards" class="card-grid"
     data-next-offset="{{ next_offset }}"
     data-page-size="{{ page_size }}"
     data-has-more="{{ has_more }}"
     data-threshold="{{ site.scroll_threshold_px }}">
    {% include "cards.html" %}
</div>
{% if has_more %}<div id="sentinel" class="sentinel" aria-hidden="true"></div>{% endif %}
{% elif active_count > 0 %}
<div class="empty">
    <p>No case studies match these filters.</p>
    <a href="{{ clear_href | safe }}" class="btn btn-secondary" data-filter-link>Clear all filters</a>
</div>
{% else %}
<div class="empty">
    <p>No case studies to show right now. Check back later.</p>
</div>
{% endif %}
</div>
{% endblock %}
"##;

const CARDS_TEMPLATE: &str = r##"{% for card in cards %}
<article class="card">
    <a href="{{ card.href | safe }}" class="card-link">
        {% if card.thumbnail %}<div class="card-media">{{ card.thumbnail | safe }}</div>{% endif %}
        <div class="card-body">
            <h3 class="card-title">{{ card.title }}</h3>
            {% if card.summary %}<p class="card-summary">{{ card.summary }}</p>{% endif %}
            <ul class="tags">
                {% for tag in card.tech_stack %}<li class="tag">{{ tag }}</li>{% endfor %}
                {% for tag in card.industry %}<li class="tag tag-industry">{{ tag }}</li>{% endfor %}
            </ul>
        </div>
    </a>
</article>
{% endfor %}
"##;

const DETAIL_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}{{ record.title }} - {{ site.name }}{% endblock %}
{% block description %}{{ description }}{% endblock %}
{% block og_title %}{{ record.title }}{% endblock %}
{% block content %}
<article class="detail">
    <a href="/work" class="back">{{ icons.arrow_left | safe }} All {{ site.title | lower }}</a>
    <h1>{{ record.title }}</h1>
    {% if record.summary %}<p class="detail-summary">{{ record.summary }}</p>{% endif %}
    <ul class="tags">
        {% for tag in record.tech_stack %}<li class="tag">{{ tag }}</li>{% endfor %}
        {% for tag in record.industry %}<li class="tag tag-industry">{{ tag }}</li>{% endfor %}
    </ul>
    {% if updated %}<p class="meta">Updated {{ updated }}</p>{% endif %}

    {% if gallery %}
    <div class="carousel" data-carousel>
        <button type="button" class="carousel-prev" aria-label="Previous image" data-carousel-prev>{{ icons.arrow_left | safe }}</button>
        <div class="carousel-track">
            {% for slide in gallery %}<div class="carousel-slide">{{ slide | safe }}</div>{% endfor %}
        </div>
        <button type="button" class="carousel-next" aria-label="Next image" data-carousel-next>{{ icons.arrow_right | safe }}</button>
    </div>
    {% endif %}

    {% for section in sections %}
    <section class="detail-section" id="{{ section.id }}">
        <h2>{{ section.title }}</h2>
        {{ section.html | safe }}
    </section>
    {% endfor %}

    {% if dashboard_url %}
    <section class="detail-section">
        <h2>{{ icons.chart | safe }} Live dashboard</h2>
        <iframe class="dashboard" src="{{ dashboard_url }}" loading="lazy" title="{{ record.title }} dashboard"></iframe>
    </section>
    {% endif %}

    {% if record.links or document_href %}
    <section class="detail-links">
        {% for link in record.links %}
        <a href="{{ link.url }}" class="btn btn-secondary" rel="noopener" target="_blank">{{ link.label }} {{ icons.external_link | safe }}</a>
        {% endfor %}
        {% if document_href %}
        <a href="{{ document_href | safe }}" class="btn">{{ icons.download | safe }} Download write-up</a>
        {% endif %}
    </section>
    {% endif %}
</article>
{% endblock %}
"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Not found - {{ site.name }}{% endblock %}
{% block content %}
<div class="empty">
    <h1>Not found</h1>
    <p>{{ message }}</p>
    <a href="/work" class="btn btn-secondary">Browse {{ site.title | lower }}</a>
</div>
{% endblock %}
"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Error - {{ site.name }}{% endblock %}
{% block content %}
<div class="empty">
    <h1>Something went wrong</h1>
    <p>This page could not be displayed.</p>
    <a href="" class="btn">Retry</a>
</div>
{% endblock %}
"##;
