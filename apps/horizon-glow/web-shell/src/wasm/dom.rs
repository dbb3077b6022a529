use super::*;

fn js_error(action: &'static str) -> impl Fn(JsValue) -> SurfaceError {
    move |value| SurfaceError::dom(action, format!("{value:?}"))
}

fn page_document() -> Result<Document, SurfaceError> {
    web_sys::window()
        .ok_or(SurfaceError::Missing("window"))?
        .document()
        .ok_or(SurfaceError::Missing("document"))
}

fn create(document: &Document, tag: &str, classes: &str) -> Result<Element, SurfaceError> {
    let element = document
        .create_element(tag)
        .map_err(js_error("create element"))?;
    if !classes.is_empty() {
        element.set_class_name(classes);
    }
    Ok(element)
}

fn icon(document: &Document, icon_class: &str) -> Result<Element, SurfaceError> {
    let wrapper = create(document, "span", "icon")?;
    let glyph = create(document, "i", &format!("fa-solid {icon_class}"))?;
    append(&wrapper, &glyph)?;
    Ok(wrapper)
}

fn append(parent: &Element, child: &Element) -> Result<(), SurfaceError> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(js_error("append element"))
}

fn find(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

#[derive(Debug, Clone)]
pub(super) struct DomText {
    element: Element,
}

impl TextSlot for DomText {
    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn add_class(&self, class: &str) {
        if let Err(error) = self.element.class_list().add_1(class) {
            warn!(?error, class, "failed to add class");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(error) = self.element.class_list().remove_1(class) {
            warn!(?error, class, "failed to remove class");
        }
    }
}

/// The `.dropdown-content` element of the user menu.
#[derive(Debug, Clone)]
pub(super) struct DomMenu {
    content: Element,
}

impl MenuSlot for DomMenu {
    fn contains_entry(&self, marker_class: &str) -> bool {
        find(&self.content, &format!(".{marker_class}")).is_some()
    }

    fn insert_before_divider(&self, entry: &MenuEntry) -> Result<(), SurfaceError> {
        let document = page_document()?;
        let divider = find(&self.content, &format!(".{MENU_DIVIDER_CLASS}"))
            .ok_or(SurfaceError::Missing("user menu divider"))?;
        let link = menu_link(
            &document,
            &format!("dropdown-item {}", entry.marker_class),
            &entry.href,
            entry.icon,
            entry.label,
        )?;
        self.content
            .insert_before(&link, Some(&divider))
            .map(|_| ())
            .map_err(js_error("insert menu entry"))
    }

    fn mark_active(&self, marker_class: &str) -> bool {
        let Some(entry) = find(&self.content, &format!(".{marker_class}")) else {
            return false;
        };
        if let Err(error) = entry.class_list().add_1(ACTIVE_CLASS) {
            warn!(?error, marker_class, "failed to mark menu entry active");
        }
        true
    }
}

fn menu_link(
    document: &Document,
    classes: &str,
    href: &str,
    icon_class: &str,
    label: &str,
) -> Result<Element, SurfaceError> {
    let link = create(document, "a", classes)?;
    link.set_attribute("href", href)
        .map_err(js_error("set link target"))?;
    append(&link, &icon(document, icon_class)?)?;
    let text = create(document, "span", "")?;
    text.set_text_content(Some(label));
    append(&link, &text)?;
    Ok(link)
}

pub(super) fn ensure_notifications_container() -> Result<Element, SurfaceError> {
    let document = page_document()?;
    if let Some(existing) = document
        .query_selector(&format!(".{NOTIFICATIONS_CONTAINER_CLASS}"))
        .ok()
        .flatten()
    {
        return Ok(existing);
    }
    let body = document.body().ok_or(SurfaceError::Missing("document body"))?;
    let container = create(&document, "div", NOTIFICATIONS_CONTAINER_CLASS)?;
    body.append_child(&container)
        .map_err(js_error("append notifications container"))?;
    Ok(container)
}

struct MountedToast {
    token: ToastToken,
    element: Element,
    _on_click: Closure<dyn FnMut(web_sys::Event)>,
}

/// Renders the single toast inside the `.notifications` container.
pub(super) struct DomToastSurface {
    container: Element,
    current: RefCell<Option<MountedToast>>,
}

impl DomToastSurface {
    pub(super) fn new(container: Element) -> Self {
        Self {
            container,
            current: RefCell::new(None),
        }
    }

    fn build(
        &self,
        toast: &LiveToast,
        on_click: Box<dyn Fn()>,
    ) -> Result<MountedToast, SurfaceError> {
        let document = page_document()?;
        let element = create(
            &document,
            "div",
            &format!(
                "notification {} {}",
                toast.record.severity.css_class(),
                toast.phase.css_class()
            ),
        )?;
        element.set_id(NOTIFICATION_ID);
        append(&element, &icon(&document, NOTIFICATION_ICON)?)?;
        let message = create(&document, "span", "")?;
        message.set_text_content(Some(&toast.record.message));
        append(&element, &message)?;

        let handler =
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| on_click());
        element
            .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
            .map_err(js_error("attach toast click handler"))?;
        append(&self.container, &element)?;

        Ok(MountedToast {
            token: toast.token,
            element,
            _on_click: handler,
        })
    }
}

impl ToastSurface for DomToastSurface {
    fn render(&self, toast: &LiveToast, on_click: Box<dyn Fn()>) -> Result<(), SurfaceError> {
        if let Some(previous) = self.current.borrow_mut().take() {
            previous.element.remove();
        }
        // A toast left behind by page markup would duplicate the id.
        if let Some(stale) = find(&self.container, &format!("#{NOTIFICATION_ID}")) {
            stale.remove();
        }
        let mounted = self.build(toast, on_click)?;
        *self.current.borrow_mut() = Some(mounted);
        Ok(())
    }

    fn set_phase(&self, token: ToastToken, phase: ToastPhase) {
        let current = self.current.borrow();
        let Some(mounted) = current.as_ref().filter(|mounted| mounted.token == token) else {
            return;
        };
        let classes = mounted.element.class_list();
        for other in [ToastPhase::Entering, ToastPhase::Exiting] {
            if other != phase {
                if let Err(error) = classes.remove_1(other.css_class()) {
                    warn!(?error, token = token.get(), "failed to clear toast phase");
                }
            }
        }
        if let Err(error) = classes.add_1(phase.css_class()) {
            warn!(?error, token = token.get(), "failed to switch toast phase");
        }
    }

    fn remove(&self, token: ToastToken) {
        let mut current = self.current.borrow_mut();
        if current.as_ref().is_some_and(|mounted| mounted.token == token) {
            if let Some(mounted) = current.take() {
                mounted.element.remove();
            }
        }
    }
}

pub(super) struct DocumentHeaderHost {
    document: Document,
    container: Option<Element>,
}

impl DocumentHeaderHost {
    pub(super) fn new() -> Result<Self, SurfaceError> {
        let document = page_document()?;
        let container = document
            .query_selector(CONTENT_CONTAINER_SELECTOR)
            .ok()
            .flatten();
        Ok(Self {
            document,
            container,
        })
    }

    fn build_header(
        &self,
        layout: &HeaderLayout,
    ) -> Result<(Element, HeaderHandles<DomText, DomMenu>), SurfaceError> {
        let document = &self.document;
        let root = create(document, "nav", "level is-mobile")?;
        root.set_id(HEADER_ROOT_ID);

        let left = create(document, "div", "level-left")?;
        let home = nav_link(document, &layout.home, "button is-ghost")?;
        append(&left, &home)?;

        let site_menu = create(document, "div", "dropdown is-hoverable")?;
        site_menu.set_id(SITE_MENU_ID);
        let site_trigger = create(document, "div", "dropdown-trigger")?;
        append(&site_trigger, &icon(document, "fa-bars")?)?;
        append(&site_menu, &site_trigger)?;
        let site_dropdown = create(document, "div", "dropdown-menu")?;
        let site_content = create(document, "div", "dropdown-content")?;
        for link in &layout.site_menu {
            append(&site_content, &nav_link(document, link, "dropdown-item")?)?;
        }
        append(&site_dropdown, &site_content)?;
        append(&site_menu, &site_dropdown)?;
        append(&left, &site_menu)?;
        append(&root, &left)?;

        let title = create(document, "h1", "level-item title")?;
        title.set_text_content(Some(layout.title));
        append(&root, &title)?;

        let right = create(document, "div", "level-right")?;
        let balance = create(document, "span", &format!("tag {SKELETON_CLASS}"))?;
        balance.set_id(BALANCE_ID);
        balance.set_text_content(Some(layout.balance_placeholder));
        append(&right, &balance)?;
        append(&right, &icon(document, "fa-wallet")?)?;

        let user_menu = create(document, "div", "dropdown is-right is-hoverable")?;
        let user_trigger = create(document, "div", "dropdown-trigger")?;
        let username = create(document, "span", SKELETON_CLASS)?;
        username.set_id(USERNAME_ID);
        username.set_text_content(Some(layout.username_placeholder));
        append(&user_trigger, &username)?;
        append(&user_menu, &user_trigger)?;
        let user_dropdown = create(document, "div", "dropdown-menu")?;
        user_dropdown.set_id(USER_MENU_ID);
        let user_content = create(document, "div", "dropdown-content")?;
        for link in &layout.user_menu {
            append(&user_content, &nav_link(document, link, "dropdown-item")?)?;
        }
        append(&user_content, &create(document, "hr", MENU_DIVIDER_CLASS)?)?;
        for link in &layout.trailing {
            append(&user_content, &nav_link(document, link, "dropdown-item")?)?;
        }
        append(&user_dropdown, &user_content)?;
        append(&user_menu, &user_dropdown)?;
        append(&right, &user_menu)?;
        append(&root, &right)?;

        Ok((
            root,
            HeaderHandles {
                username: DomText { element: username },
                balance: DomText { element: balance },
                user_menu: DomMenu {
                    content: user_content,
                },
            },
        ))
    }
}

fn nav_link(
    document: &Document,
    link: &NavLink,
    base_class: &str,
) -> Result<Element, SurfaceError> {
    let classes = match link.marker_class {
        Some(marker) => format!("{base_class} {marker}"),
        None => base_class.to_string(),
    };
    let href = match link.target {
        NavTarget::Path(path) => path,
        NavTarget::Logout => "#",
    };
    let element = menu_link(document, &classes, href, link.icon, link.label)?;
    if link.target == NavTarget::Logout {
        attach_logout_handler(&element)?;
    }
    Ok(element)
}

fn attach_logout_handler(element: &Element) -> Result<(), SurfaceError> {
    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        event.prevent_default();
        super::logout();
    });
    element
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(js_error("attach logout handler"))?;
    LOGOUT_CLICK_HANDLER.with(|slot| *slot.borrow_mut() = Some(handler));
    Ok(())
}

impl HeaderHost for DocumentHeaderHost {
    type Text = DomText;
    type Menu = DomMenu;

    fn find_mounted(&self) -> Option<HeaderHandles<DomText, DomMenu>> {
        let username = self.document.get_element_by_id(USERNAME_ID)?;
        let balance = self.document.get_element_by_id(BALANCE_ID)?;
        let menu = self.document.get_element_by_id(USER_MENU_ID)?;
        let content = find(&menu, MENU_CONTENT_SELECTOR)?;

        // Server-rendered headers arrive without a wired logout entry.
        let unwired = LOGOUT_CLICK_HANDLER.with(|slot| slot.borrow().is_none());
        if unwired {
            if let Some(entry) = find(&content, &format!(".{LOGOUT_ENTRY_CLASS}")) {
                if let Err(error) = attach_logout_handler(&entry) {
                    warn!(%error, "logout entry left unwired");
                }
            }
        }

        Some(HeaderHandles {
            username: DomText { element: username },
            balance: DomText { element: balance },
            user_menu: DomMenu { content },
        })
    }

    fn insert_header(
        &self,
        layout: &HeaderLayout,
    ) -> Result<HeaderHandles<DomText, DomMenu>, SurfaceError> {
        let container = self
            .container
            .as_ref()
            .ok_or(SurfaceError::Missing("content container"))?;
        let (root, handles) = self.build_header(layout)?;
        container
            .insert_before(&root, container.first_child().as_ref())
            .map_err(js_error("insert header"))?;
        Ok(handles)
    }
}
