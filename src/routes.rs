use crate::locale::path_language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Videos,
    Photos,
    BlogPosts,
    Documents,
    Sponsors,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Videos => "videos",
            Collection::Photos => "photos",
            Collection::BlogPosts => "blogposts",
            Collection::Documents => "documents",
            Collection::Sponsors => "sponsors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    PhotoGallery,
    VideoGallery,
    Calendar,
    Documents,
    Blog,
    BlogPost(String),
    Testimonials,
    Faq,
    Volunteering,
    Projects,
    Donations,
    Sponsors,
    Contacts,
    Members,
}

const STATIC_ROUTES: &[(&str, Page)] = &[
    ("", Page::Home),
    ("sobre", Page::About),
    ("galeria-fotos", Page::PhotoGallery),
    ("galeria-videos", Page::VideoGallery),
    ("calendario", Page::Calendar),
    ("documentos", Page::Documents),
    ("blog", Page::Blog),
    ("depoimentos", Page::Testimonials),
    ("faq", Page::Faq),
    ("voluntariado", Page::Volunteering),
    ("projetos", Page::Projects),
    ("doacoes", Page::Donations),
    ("patrocinadores", Page::Sponsors),
    ("contatos", Page::Contacts),
    ("membros", Page::Members),
];

impl Page {
    /// Menu order, as the site header lists them.
    pub const MENU: &[Page] = &[
        Page::Home,
        Page::About,
        Page::Projects,
        Page::PhotoGallery,
        Page::VideoGallery,
        Page::Calendar,
        Page::Blog,
        Page::Documents,
        Page::Testimonials,
        Page::Volunteering,
        Page::Donations,
        Page::Sponsors,
        Page::Faq,
        Page::Contacts,
        Page::Members,
    ];

    /// Route a `/:lang/...` path. Paths without a language segment never match.
    pub fn from_path(path: &str) -> Option<Page> {
        path_language(path)?;
        let rest = path[4..].split(['?', '#']).next().unwrap_or_default();
        let rest = rest.trim_end_matches('/');

        if let Some(id) = rest.strip_prefix("blog/") {
            return (!id.is_empty() && !id.contains('/')).then(|| Page::BlogPost(id.to_string()));
        }

        STATIC_ROUTES
            .iter()
            .find(|(slug, _)| *slug == rest)
            .map(|(_, page)| page.clone())
    }

    pub fn slug(&self) -> String {
        match self {
            Page::BlogPost(id) => format!("blog/{id}"),
            page => STATIC_ROUTES
                .iter()
                .find(|(_, p)| p == page)
                .map(|(slug, _)| slug.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn collection(&self) -> Option<Collection> {
        match self {
            Page::VideoGallery => Some(Collection::Videos),
            Page::PhotoGallery => Some(Collection::Photos),
            Page::Blog | Page::BlogPost(_) => Some(Collection::BlogPosts),
            Page::Documents => Some(Collection::Documents),
            Page::Sponsors => Some(Collection::Sponsors),
            _ => None,
        }
    }

    /// Translation key of the page title.
    pub fn title_key(&self) -> &'static str {
        match self {
            Page::Home => "pages.home",
            Page::About => "pages.about",
            Page::PhotoGallery => "pages.photo_gallery",
            Page::VideoGallery => "pages.video_gallery",
            Page::Calendar => "pages.calendar",
            Page::Documents => "pages.documents",
            Page::Blog | Page::BlogPost(_) => "pages.blog",
            Page::Testimonials => "pages.testimonials",
            Page::Faq => "pages.faq",
            Page::Volunteering => "pages.volunteering",
            Page::Projects => "pages.projects",
            Page::Donations => "pages.donations",
            Page::Sponsors => "pages.sponsors",
            Page::Contacts => "pages.contacts",
            Page::Members => "pages.members",
        }
    }

    pub fn menu_index(&self) -> usize {
        let this = match self {
            Page::BlogPost(_) => &Page::Blog,
            page => page,
        };
        Page::MENU.iter().position(|p| p == this).unwrap_or(0)
    }
}

pub fn page_path(lang: &str, page: &Page) -> String {
    format!("/{lang}/{}", page.slug())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_static_pages() {
        assert_eq!(Page::from_path("/pt/"), Some(Page::Home));
        assert_eq!(Page::from_path("/en/sobre"), Some(Page::About));
        assert_eq!(Page::from_path("/en/galeria-videos/"), Some(Page::VideoGallery));
        assert_eq!(Page::from_path("/pt/patrocinadores?ref=x"), Some(Page::Sponsors));
        assert_eq!(Page::from_path("/pt/nada"), None);
    }

    #[test]
    fn routes_blog_posts() {
        assert_eq!(
            Page::from_path("/pt/blog/42"),
            Some(Page::BlogPost("42".to_string()))
        );
        assert_eq!(Page::from_path("/pt/blog/"), Some(Page::Blog));
        assert_eq!(Page::from_path("/pt/blog/42/extra"), None);
    }

    #[test]
    fn unprefixed_paths_do_not_route() {
        assert_eq!(Page::from_path("/blog"), None);
        assert_eq!(Page::from_path("/en"), None);
    }

    #[test]
    fn builds_canonical_paths() {
        assert_eq!(page_path("pt", &Page::Home), "/pt/");
        assert_eq!(page_path("en", &Page::Documents), "/en/documentos");
        assert_eq!(
            page_path("en", &Page::BlogPost("7".to_string())),
            "/en/blog/7"
        );
        for page in Page::MENU {
            assert_eq!(Page::from_path(&page_path("pt", page)).as_ref(), Some(page));
        }
    }

    #[test]
    fn listing_pages_name_their_collection() {
        assert_eq!(Page::VideoGallery.collection(), Some(Collection::Videos));
        assert_eq!(
            Page::BlogPost("1".to_string()).collection(),
            Some(Collection::BlogPosts)
        );
        assert_eq!(Page::Faq.collection(), None);
    }
}
